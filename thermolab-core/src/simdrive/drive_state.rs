use crate::imports::*;

/// Discrete operating mode, recomputed from scratch every tick (no hysteresis)
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriveState {
    #[default]
    #[serde(rename = "STANDBY")]
    Standby,
    #[serde(rename = "LAUNCH")]
    Launch,
    #[serde(rename = "ACCELERATING")]
    Accelerating,
    #[serde(rename = "COASTING")]
    Coasting,
    #[serde(rename = "BRAKING")]
    Braking,
    #[serde(rename = "REGEN BRAKING")]
    RegenBraking,
}

impl DriveState {
    /// Label shown on the telemetry panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standby => "STANDBY",
            Self::Launch => "LAUNCH",
            Self::Accelerating => "ACCELERATING",
            Self::Coasting => "COASTING",
            Self::Braking => "BRAKING",
            Self::RegenBraking => "REGEN BRAKING",
        }
    }

    /// Classifies the instantaneous operating mode; first match wins.
    ///
    /// # Arguments
    /// - `gas`: smoothed accelerator level
    /// - `brake`: smoothed brake level
    /// - `speed_mps`: speed at the end of the tick
    /// - `regen_kw`: power recovered during the tick
    pub fn classify(gas: f64, brake: f64, speed_mps: f64, regen_kw: f64) -> Self {
        if gas > 0.05 && speed_mps > 0.5 {
            Self::Accelerating
        } else if brake > 0.05 && speed_mps > 0.5 {
            if regen_kw > 1.0 {
                Self::RegenBraking
            } else {
                Self::Braking
            }
        } else if speed_mps > 1.0 {
            Self::Coasting
        } else if gas > 0.0 {
            Self::Launch
        } else {
            Self::Standby
        }
    }
}

impl fmt::Display for DriveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(DriveState::classify(0.0, 0.0, 0.0, 0.0), DriveState::Standby);
        assert_eq!(DriveState::classify(0.01, 0.0, 0.0, 0.0), DriveState::Launch);
        assert_eq!(DriveState::classify(0.5, 0.0, 0.4, 0.0), DriveState::Launch);
        assert_eq!(DriveState::classify(0.5, 0.0, 0.6, 0.0), DriveState::Accelerating);
        // accelerator wins over brake when both are applied
        assert_eq!(DriveState::classify(0.5, 0.5, 10.0, 20.0), DriveState::Accelerating);
        assert_eq!(DriveState::classify(0.0, 0.5, 10.0, 20.0), DriveState::RegenBraking);
        assert_eq!(DriveState::classify(0.0, 0.5, 0.8, 0.0), DriveState::Braking);
        assert_eq!(DriveState::classify(0.0, 0.5, 10.0, 1.0), DriveState::Braking);
        assert_eq!(DriveState::classify(0.0, 0.0, 1.5, 0.0), DriveState::Coasting);
        assert_eq!(DriveState::classify(0.0, 0.04, 0.8, 0.0), DriveState::Standby);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DriveState::RegenBraking.to_string(), "REGEN BRAKING");
        for state in [
            DriveState::Standby,
            DriveState::Launch,
            DriveState::Accelerating,
            DriveState::Coasting,
            DriveState::Braking,
            DriveState::RegenBraking,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
            assert_eq!(serde_json::from_str::<DriveState>(&json).unwrap(), state);
        }
        assert!(serde_yaml::to_string(&DriveState::RegenBraking)
            .unwrap()
            .contains("REGEN BRAKING"));
    }
}
