use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the training
/// loop sends one `EpochStats` value at the end of every completed epoch.
///
/// A diverged run produces NaN or infinite losses. JSON has no literal for
/// those, so they are written as the strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Running mean training loss over all samples seen in this epoch.
    #[serde(with = "json_float")]
    pub train_loss: f64,
    /// Running training accuracy as a fraction in [0, 1].
    #[serde(with = "json_float")]
    pub train_accuracy: f64,
    /// Mean validation loss, if a validation set was provided.
    #[serde(with = "json_float::option", default)]
    pub val_loss: Option<f64>,
    /// Validation accuracy as a fraction in [0, 1], if a validation set was provided.
    #[serde(with = "json_float::option", default)]
    pub val_accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

mod json_float {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    fn to_repr(v: f64) -> Repr {
        if v.is_finite() {
            Repr::Number(v)
        } else if v.is_nan() {
            Repr::Text("NaN".into())
        } else if v > 0.0 {
            Repr::Text("inf".into())
        } else {
            Repr::Text("-inf".into())
        }
    }

    fn from_repr<E: de::Error>(repr: Repr) -> Result<f64, E> {
        match repr {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "NaN"  => Ok(f64::NAN),
                "inf"  => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other  => Err(E::custom(format!("invalid float '{}'", other))),
            },
        }
    }

    pub fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        to_repr(*v).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        from_repr(Repr::deserialize(deserializer)?)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(v: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
            (*v).map(to_repr).serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
            Option::<Repr>::deserialize(deserializer)?.map(from_repr).transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(train_loss: f64, val_loss: Option<f64>) -> EpochStats {
        EpochStats {
            epoch: 1,
            total_epochs: 2,
            train_loss,
            train_accuracy: 0.5,
            val_loss,
            val_accuracy: val_loss.map(|_| 0.5),
            elapsed_ms: 3,
        }
    }

    #[test]
    fn finite_values_stay_plain_numbers() {
        let json = serde_json::to_string(&stats(0.25, Some(0.5))).unwrap();
        assert!(json.contains("\"train_loss\":0.25"), "{}", json);
        assert!(json.contains("\"val_loss\":0.5"), "{}", json);
        let back: EpochStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats(0.25, Some(0.5)));
    }

    #[test]
    fn diverged_losses_survive_json() {
        let json = serde_json::to_string(&stats(f64::NAN, Some(f64::INFINITY))).unwrap();
        assert!(json.contains("\"train_loss\":\"NaN\""), "{}", json);
        let back: EpochStats = serde_json::from_str(&json).unwrap();
        assert!(back.train_loss.is_nan());
        assert_eq!(back.val_loss, Some(f64::INFINITY));
        assert_eq!(back.val_accuracy, Some(0.5));
    }

    #[test]
    fn missing_validation_round_trips_as_none() {
        let json = serde_json::to_string(&stats(0.1, None)).unwrap();
        assert!(json.contains("\"val_loss\":null"), "{}", json);
        let back: EpochStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.val_loss, None);
        assert_eq!(back.val_accuracy, None);
    }

    #[test]
    fn unknown_float_text_is_rejected() {
        let json = r#"{"epoch":1,"total_epochs":1,"train_loss":"huge","train_accuracy":1.0,"elapsed_ms":0}"#;
        assert!(serde_json::from_str::<EpochStats>(json).is_err());
    }
}
