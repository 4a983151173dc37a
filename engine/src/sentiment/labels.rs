// Reduction of raw classifier output to a SentimentResult.
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::{Sentiment, SentimentResult, SentimentScores};

#[derive(Debug, Clone, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// The inference API wraps predictions in one list per input; a bare list
/// is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Predictions {
    Batched(Vec<Vec<LabelScore>>),
    Single(Vec<LabelScore>),
}

impl Predictions {
    pub fn into_first(self) -> Vec<LabelScore> {
        match self {
            Predictions::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
            Predictions::Single(list) => list,
        }
    }
}

/// Model labels: `LABEL_0..2` from the raw checkpoint, or already-named classes.
pub fn parse_label(label: &str) -> Option<Sentiment> {
    match label.trim().to_ascii_lowercase().as_str() {
        "label_0" | "negative" => Some(Sentiment::Negative),
        "label_1" | "neutral" => Some(Sentiment::Neutral),
        "label_2" | "positive" => Some(Sentiment::Positive),
        _ => None,
    }
}

/// Argmax over the predictions. An unrecognised winning label reads as neutral.
pub fn interpret(predictions: &[LabelScore]) -> Result<SentimentResult, EngineError> {
    let best = predictions
        .iter()
        .filter(|p| p.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| EngineError::RemotePayload("no scored predictions".to_string()))?;

    let mut scores = SentimentScores::default();
    for prediction in predictions.iter().filter(|p| p.score.is_finite()) {
        if let Some(sentiment) = parse_label(&prediction.label) {
            scores.set(sentiment, prediction.score);
        }
    }

    Ok(SentimentResult {
        sentiment: parse_label(&best.label).unwrap_or(Sentiment::Neutral),
        confidence: best.score,
        scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(label: &str, score: f64) -> LabelScore {
        LabelScore { label: label.to_string(), score }
    }

    #[test]
    fn test_argmax_selects_class() {
        let result = interpret(&[
            scored("LABEL_2", 0.81),
            scored("LABEL_1", 0.15),
            scored("LABEL_0", 0.04),
        ])
        .unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.confidence, 0.81);
        assert_eq!(result.scores, SentimentScores { negative: 0.04, neutral: 0.15, positive: 0.81 });
    }

    #[test]
    fn test_named_labels_and_missing_classes() {
        let result = interpret(&[scored("Negative", 0.7), scored("neutral", 0.3)]).unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.scores.positive, 0.0);
    }

    #[test]
    fn test_unknown_winning_label_is_neutral() {
        let result = interpret(&[scored("LABEL_9", 0.9), scored("LABEL_0", 0.1)]).unwrap();
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.scores.negative, 0.1);
    }

    #[test]
    fn test_empty_predictions_are_an_error() {
        assert!(matches!(interpret(&[]), Err(EngineError::RemotePayload(_))));
    }

    #[test]
    fn test_prediction_shapes() {
        let batched: Predictions = serde_json::from_str(r#"[[{"label": "LABEL_1", "score": 0.5}]]"#).unwrap();
        assert_eq!(batched.into_first().len(), 1);
        let single: Predictions = serde_json::from_str(r#"[{"label": "LABEL_1", "score": 0.5}]"#).unwrap();
        assert_eq!(single.into_first()[0].label, "LABEL_1");
        let empty: Predictions = serde_json::from_str("[]").unwrap();
        assert!(empty.into_first().is_empty());
    }
}
