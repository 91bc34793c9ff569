use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(SurveyId);
id_newtype!(QuestionId);

/// One survey item. `choice` holds the answer currently selected by the
/// user, or `None` when nothing is selected yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub choice: Option<String>,
}

/// A collection of questions presented to a user.
///
/// `questions` carries no serde default on purpose: a server payload
/// without it is malformed and must fail to decode rather than produce a
/// question-less survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: SurveyId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_choice_defaults_to_none() {
        let question: Question =
            serde_json::from_str(r#"{"question_id": 7, "text": "Favorite color?"}"#)
                .expect("question without choice must decode");
        assert_eq!(question.question_id, QuestionId(7));
        assert_eq!(question.choice, None);
        assert!(question.answers.is_empty());
    }

    #[test]
    fn survey_without_questions_is_rejected() {
        let result = serde_json::from_str::<Survey>(r#"{"survey_id": 1, "title": "Lunch"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn survey_round_trips_with_selected_choices() {
        let raw = r#"{
            "survey_id": 3,
            "title": "Team lunch",
            "description": "Pick one",
            "questions": [
                {"question_id": 1, "text": "Where?", "answers": ["Tacos", "Ramen"], "choice": "Ramen"}
            ]
        }"#;
        let survey: Survey = serde_json::from_str(raw).expect("survey must decode");
        assert_eq!(survey.survey_id, SurveyId(3));
        assert_eq!(survey.questions.len(), 1);
        assert_eq!(survey.questions[0].choice.as_deref(), Some("Ramen"));
    }
}
