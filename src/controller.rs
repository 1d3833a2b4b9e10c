// src/controller.rs
// Prediction form controller: one explicit status, one form, one options set

use tracing::{debug, info, warn};

use crate::api::{FormOptions, NumericRanges, PredictionApi, PredictionKind, PredictionResult};
use crate::error::{PredictError, Result};
use crate::form::{Field, FieldKind, FormOptionsLoader, FormState, LoadedOptions};
use crate::render::ResultView;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    LoadingOptions,
    Ready,
    Predicting(PredictionKind),
    ResultShown(PredictionResult),
    /// Non-terminal: the form stays editable and can be resubmitted
    Error(String),
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::LoadingOptions => "loading_options",
            Status::Ready => "ready",
            Status::Predicting(_) => "predicting",
            Status::ResultShown(_) => "result_shown",
            Status::Error(_) => "error",
        }
    }
}

/// Snapshot of a submit in flight
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub id: u64,
    pub kind: PredictionKind,
    pub form: FormState,
}

#[derive(Debug, Clone)]
pub struct PredictionController {
    form: FormState,
    options: FormOptions,
    ranges: NumericRanges,
    status: Status,
    issued: u64,
}

impl Default for PredictionController {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionController {
    pub fn new() -> Self {
        Self::with_form(FormState::new())
    }

    pub fn with_form(form: FormState) -> Self {
        Self {
            form,
            options: FormOptions::default(),
            ranges: NumericRanges::default(),
            status: Status::Idle,
            issued: 0,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn ranges(&self) -> &NumericRanges {
        &self.ranges
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Options are pending until the first load cycle completes
    pub fn is_loading_options(&self) -> bool {
        matches!(self.status, Status::Idle | Status::LoadingOptions)
    }

    pub fn is_predicting(&self) -> bool {
        matches!(self.status, Status::Predicting(_))
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.status {
            Status::ResultShown(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn result_view(&self) -> Option<ResultView> {
        self.result().map(ResultView::from_result)
    }

    // ---------- Options ----------

    /// Idle -> LoadingOptions. Returns false if a load already happened.
    pub fn begin_loading_options(&mut self) -> bool {
        if self.status != Status::Idle {
            return false;
        }
        self.status = Status::LoadingOptions;
        true
    }

    /// Install options from a completed load cycle
    pub fn apply_options(&mut self, loaded: LoadedOptions) {
        loaded.apply_defaults(&mut self.form);
        self.options = loaded.options;
        self.ranges = loaded.ranges;
        self.status = match loaded.notice {
            Some(notice) => Status::Error(notice),
            None => Status::Ready,
        };
        debug!(status = self.status.label(), "Options applied");
    }

    pub async fn load_options<A>(&mut self, api: &A)
    where
        A: PredictionApi + ?Sized,
    {
        if !self.begin_loading_options() {
            return;
        }
        let loaded = FormOptionsLoader::load(api).await;
        self.apply_options(loaded);
    }

    // ---------- Field editing ----------

    /// Swap in a whole form, e.g. one read from a file
    pub fn replace_form(&mut self, form: FormState) {
        self.form = form.normalized();
    }

    /// Categorical values that are not among the loaded choices
    pub fn unlisted_values(&self) -> Vec<(Field, String)> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| f.kind() == FieldKind::Categorical)
            .filter_map(|f| {
                let value = self.form.get(f);
                let choices = self.options.choices(f);
                if value.is_empty() || choices.is_empty() || choices.contains(&value) {
                    None
                } else {
                    Some((f, value))
                }
            })
            .collect()
    }

    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<()> {
        self.form.set(field, raw)
    }

    pub fn set_field_by_name(&mut self, name: &str, raw: &str) -> Result<()> {
        self.form.set_by_name(name, raw)
    }

    pub fn set_amenity(&mut self, tag: &str, selected: bool) {
        self.form.set_amenity(tag, selected);
    }

    pub fn toggle_amenity(&mut self, tag: &str) -> bool {
        self.form.toggle_amenity(tag)
    }

    // ---------- Submission ----------

    /// Why submit is disabled right now, if it is
    pub fn submit_blocker(&self) -> Option<String> {
        if self.is_loading_options() {
            return Some("form options are still loading".to_string());
        }
        if self.is_predicting() {
            return Some("a prediction is already in progress".to_string());
        }
        let missing = self.form.missing_required();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            return Some(format!("missing {}", names.join(", ")));
        }
        None
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocker().is_none()
    }

    /// Enter `Predicting` and snapshot the form for the request body.
    /// Any previous result or error is cleared.
    pub fn begin_submit(&mut self, kind: PredictionKind) -> Result<SubmitTicket> {
        if let Some(reason) = self.submit_blocker() {
            return Err(PredictError::NotSubmittable(reason));
        }
        self.issued += 1;
        self.status = Status::Predicting(kind);
        info!(ticket = self.issued, model = %kind, "Prediction requested");
        Ok(SubmitTicket {
            id: self.issued,
            kind,
            form: self.form.clone(),
        })
    }

    /// Apply a finished request. Whichever response lands last is shown.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, outcome: Result<PredictionResult>) {
        if ticket.id != self.issued {
            debug!(ticket = ticket.id, latest = self.issued, "Stale prediction response applied");
        }
        self.status = match outcome {
            Ok(result) => {
                info!(ticket = ticket.id, model = %ticket.kind, "Prediction received");
                Status::ResultShown(result)
            }
            Err(err) => {
                warn!(ticket = ticket.id, error = %err, "Prediction failed");
                Status::Error(err.to_string())
            }
        };
    }

    /// Full submit cycle against `api`
    pub async fn submit<A>(&mut self, api: &A, kind: PredictionKind) -> Result<&Status>
    where
        A: PredictionApi + ?Sized,
    {
        let ticket = self.begin_submit(kind)?;
        let outcome = api.predict(ticket.kind, &ticket.form).await;
        self.finish_submit(ticket, outcome);
        Ok(&self.status)
    }
}
