use crate::api::{BulletPointsResponse, SummaryResponse};

/// What the presentation layer is allowed to show.
///
/// The record only changes through the transitions below, so every screen
/// update has a single well-defined predecessor. `summary` and
/// `bullet_points` are `None` until the first successful call of their
/// kind; an empty bullet list is a rendered result, not an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub input: String,
    pub summary: Option<String>,
    pub bullet_points: Option<Vec<String>>,
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// A request is in flight; the caller should block re-submission.
    Working,
    Failed(String),
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, text: impl Into<String>) -> Self {
        self.input = text.into();
        self
    }

    pub fn begin(mut self) -> Self {
        self.activity = Activity::Working;
        self
    }

    pub fn finish_summary(mut self, response: SummaryResponse) -> Self {
        self.summary = Some(response.summary);
        self.activity = Activity::Idle;
        self
    }

    pub fn finish_bullet_points(mut self, response: BulletPointsResponse) -> Self {
        self.bullet_points = Some(response.bullet_points);
        self.activity = Activity::Idle;
        self
    }

    /// A failed call keeps whatever was already on screen.
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.activity = Activity::Failed(message.into());
        self
    }

    pub fn is_working(&self) -> bool {
        matches!(self.activity, Activity::Working)
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.activity {
            Activity::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_idle_and_empty() {
        let state = ViewState::new();

        assert_eq!(state.activity, Activity::Idle);
        assert_eq!(state.summary, None);
        assert_eq!(state.bullet_points, None);
        assert!(!state.is_working());
    }

    #[test]
    fn begin_marks_the_state_working() {
        let state = ViewState::new().with_input("some text").begin();

        assert!(state.is_working());
        assert_eq!(state.input, "some text");
    }

    #[test]
    fn success_stores_the_payload_and_returns_to_idle() {
        let state = ViewState::new().begin().finish_summary(SummaryResponse {
            summary: "A fox jumps over a dog.".to_string(),
        });

        assert_eq!(state.summary.as_deref(), Some("A fox jumps over a dog."));
        assert_eq!(state.activity, Activity::Idle);
    }

    #[test]
    fn empty_bullet_list_is_a_rendered_result() {
        let state = ViewState::new()
            .begin()
            .finish_bullet_points(BulletPointsResponse {
                bullet_points: vec![],
            });

        assert_eq!(state.bullet_points, Some(vec![]));
        assert_eq!(state.activity, Activity::Idle);
    }

    #[test]
    fn failure_keeps_previous_output_visible() {
        let state = ViewState::new()
            .begin()
            .finish_summary(SummaryResponse {
                summary: "first summary".to_string(),
            })
            .begin()
            .fail("request failed");

        assert_eq!(state.summary.as_deref(), Some("first summary"));
        assert_eq!(state.failure(), Some("request failed"));
        assert!(!state.is_working());
    }

    #[test]
    fn bullet_points_survive_a_failed_summary() {
        let state = ViewState::new()
            .begin()
            .finish_bullet_points(BulletPointsResponse {
                bullet_points: vec!["one".to_string(), "two".to_string()],
            })
            .begin()
            .fail("boom");

        assert_eq!(
            state.bullet_points,
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }
}
