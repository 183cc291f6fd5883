//! Module containing scripted pedal inputs for batch (non-interactive) runs.

use crate::imports::*;
use crate::simdrive::PedalIntent;

/// Step used when a script is loaded from a format that does not carry one, s
pub const DEFAULT_DT_S: f64 = 0.02;

/// Upper bound on the ticks a single script may request
pub const MAX_TICKS: usize = 10_000_000;

fn default_dt_s() -> f64 {
    DEFAULT_DT_S
}

/// Pedal intent that takes effect at `time_s` and holds until the next event
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PedalEvent {
    pub time_s: f64,
    pub gas: bool,
    pub brake: bool,
}

impl PedalEvent {
    pub fn new(time_s: f64, intent: PedalIntent) -> Self {
        Self {
            time_s,
            gas: intent.gas,
            brake: intent.brake,
        }
    }

    pub fn intent(&self) -> PedalIntent {
        PedalIntent {
            gas: self.gas,
            brake: self.brake,
        }
    }
}

/// Timed sequence of pedal events replayed at a fixed step by
/// [`SimDrive::walk`](crate::simdrive::SimDrive::walk). The last event marks
/// the end of the script.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DriveScript {
    #[serde(default)]
    pub name: String,
    /// fixed tick size, s
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    pub events: Vec<PedalEvent>,
}

impl DriveScript {
    pub fn new(name: &str, dt_s: f64, events: Vec<PedalEvent>) -> anyhow::Result<Self> {
        let mut script = Self {
            name: name.to_string(),
            dt_s,
            events,
        };
        script.init()?;
        Ok(script)
    }

    /// Accelerator held from standstill for `duration_s`
    pub fn launch(duration_s: f64) -> Self {
        Self {
            name: "launch".into(),
            dt_s: DEFAULT_DT_S,
            events: vec![
                PedalEvent::new(0.0, PedalIntent::GAS),
                PedalEvent::new(duration_s, PedalIntent::RELEASED),
            ],
        }
    }

    /// Accelerate for `gas_s`, coast for `coast_s`, then brake for `brake_s`
    pub fn launch_then_brake(gas_s: f64, coast_s: f64, brake_s: f64) -> Self {
        Self {
            name: "launch_then_brake".into(),
            dt_s: DEFAULT_DT_S,
            events: vec![
                PedalEvent::new(0.0, PedalIntent::GAS),
                PedalEvent::new(gas_s, PedalIntent::RELEASED),
                PedalEvent::new(gas_s + coast_s, PedalIntent::BRAKE),
                PedalEvent::new(gas_s + coast_s + brake_s, PedalIntent::RELEASED),
            ],
        }
    }

    /// Intent of the last event at or before `time_s`, released before the first event
    pub fn intent_at(&self, time_s: f64) -> PedalIntent {
        match self.events.partition_point(|e| e.time_s <= time_s) {
            0 => PedalIntent::RELEASED,
            n => self.events[n - 1].intent(),
        }
    }

    /// Time of the final event, s
    pub fn duration_s(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.time_s)
    }

    /// Number of fixed-step ticks needed to cover the script
    pub fn n_ticks(&self) -> usize {
        (self.duration_s() / self.dt_s).round() as usize
    }

    /// Load script from CSV file, parsing name from filepath
    pub fn from_csv_file<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let name = filepath
            .file_stem()
            .and_then(OsStr::to_str)
            .with_context(|| format!("Could not parse script name from filepath: {filepath:?}"))?
            .to_string();
        let mut script = Self::from_file(filepath)?;
        script.name = name;
        Ok(script)
    }

    /// Load script from CSV string
    pub fn from_csv_str<S: AsRef<str>>(csv_str: S, name: String) -> anyhow::Result<Self> {
        let mut script = Self::from_str(csv_str, "csv")?;
        script.name = name;
        Ok(script)
    }

    /// Write (serialize) the events to a CSV string. Name and step are not kept.
    pub fn to_csv(&self) -> anyhow::Result<String> {
        let mut buf = Vec::with_capacity(self.events.len() * 16);
        self.to_writer(&mut buf, "csv")?;
        Ok(String::from_utf8(buf)?)
    }
}

impl ObjState for DriveScript {
    fn validate(&self) -> ValidationResults {
        let mut errors = ValidationErrors::new();
        chk_num_gtz_fin(&mut errors, self.dt_s, "Script step");
        if self.events.is_empty() {
            errors.push(anyhow!("Script must have at least one event!"));
        }
        early_err!(errors, "DriveScript");

        for (i, event) in self.events.iter().enumerate() {
            chk_num_gez_fin(&mut errors, event.time_s, &format!("Event {i} time"));
        }
        let times: Vec<f64> = self.events.iter().map(|e| e.time_s).collect();
        if !is_sorted(&times) {
            errors.push(anyhow!("Event times must be non-decreasing!"));
        }
        if self.duration_s() <= 0.0 {
            errors.push(anyhow!(
                "Script duration = {:?} must be larger than zero!",
                self.duration_s()
            ));
        } else if self.duration_s() / self.dt_s > MAX_TICKS as f64 {
            errors.push(anyhow!(
                "Script duration = {:?} s at step {:?} s exceeds {} ticks!",
                self.duration_s(),
                self.dt_s,
                MAX_TICKS
            ));
        }
        errors.make_err()
    }
}

impl SerdeAPI for DriveScript {
    const ACCEPTED_BYTE_FORMATS: &'static [&'static str] = &["yaml", "json", "csv"];
    const ACCEPTED_STR_FORMATS: &'static [&'static str] = &["yaml", "json", "csv"];

    fn init(&mut self) -> anyhow::Result<()> {
        self.validate()
            .with_context(|| format!("Invalid drive script {:?}", self.name))?;
        Ok(())
    }

    fn to_writer<W: std::io::Write>(&self, wtr: W, format: &str) -> anyhow::Result<()> {
        match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::to_writer(wtr, self)?,
            "json" => serde_json::to_writer(wtr, self)?,
            "csv" => {
                let mut wtr = csv::Writer::from_writer(wtr);
                for event in &self.events {
                    wtr.serialize(event)?;
                }
                wtr.flush()?
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        }
        Ok(())
    }

    fn to_str(&self, format: &str) -> anyhow::Result<String> {
        Ok(
            match format.trim_start_matches('.').to_lowercase().as_str() {
                "yaml" | "yml" => self.to_yaml()?,
                "json" => self.to_json()?,
                "csv" => self.to_csv()?,
                _ => bail!(
                    "Unsupported format {format:?}, must be one of {:?}",
                    Self::ACCEPTED_STR_FORMATS
                ),
            },
        )
    }

    /// Note that using this method to instantiate a script from CSV, rather
    /// than the `from_csv_str` method, sets the script name to an empty string
    fn from_str<S: AsRef<str>>(contents: S, format: &str) -> anyhow::Result<Self> {
        Ok(
            match format.trim_start_matches('.').to_lowercase().as_str() {
                "yaml" | "yml" => Self::from_yaml(contents)?,
                "json" => Self::from_json(contents)?,
                "csv" => Self::from_reader(contents.as_ref().as_bytes(), "csv")?,
                _ => bail!(
                    "Unsupported format {format:?}, must be one of {:?}",
                    Self::ACCEPTED_STR_FORMATS
                ),
            },
        )
    }

    fn from_reader<R: std::io::Read>(rdr: R, format: &str) -> anyhow::Result<Self> {
        let mut deserialized = match format.trim_start_matches('.').to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_reader(rdr)?,
            "json" => serde_json::from_reader(rdr)?,
            "csv" => {
                let mut rdr = csv::Reader::from_reader(rdr);
                let events = rdr
                    .deserialize()
                    .collect::<Result<Vec<PedalEvent>, _>>()?;
                Self {
                    name: String::new(),
                    dt_s: DEFAULT_DT_S,
                    events,
                }
            }
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        };
        deserialized.init()?;
        Ok(deserialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAUNCH_AND_BRAKE_CSV: &str = include_str!("../resources/launch_and_brake.csv");

    #[test]
    fn test_intent_lookup() {
        let script = DriveScript::from_csv_str(LAUNCH_AND_BRAKE_CSV, "lab".into()).unwrap();
        assert_eq!(script.intent_at(-0.5), PedalIntent::RELEASED);
        assert_eq!(script.intent_at(0.5), PedalIntent::RELEASED);
        assert_eq!(script.intent_at(1.0), PedalIntent::GAS);
        assert_eq!(script.intent_at(5.99), PedalIntent::GAS);
        assert_eq!(script.intent_at(7.0), PedalIntent::RELEASED);
        assert_eq!(script.intent_at(8.0), PedalIntent::BRAKE);
        assert_eq!(script.intent_at(100.0), PedalIntent::RELEASED);
    }

    #[test]
    fn test_csv_loading() {
        let script = DriveScript::from_csv_str(LAUNCH_AND_BRAKE_CSV, "lab".into()).unwrap();
        assert_eq!(script.name, "lab");
        assert_eq!(script.dt_s, DEFAULT_DT_S);
        assert_eq!(script.events.len(), 5);
        assert_eq!(script.duration_s(), 12.0);
        assert_eq!(script.n_ticks(), 600);

        let from_file = DriveScript::from_csv_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/resources/launch_and_brake.csv"
        ))
        .unwrap();
        assert_eq!(from_file.name, "launch_and_brake");
        assert_eq!(from_file.events, script.events);

        let csv = script.to_csv().unwrap();
        assert!(csv.starts_with("time_s,gas,brake"));
        assert_eq!(DriveScript::from_str(csv, "csv").unwrap().events, script.events);
    }

    #[test]
    fn test_yaml_falls_back_to_default_step() {
        let yaml = "name: short\nevents:\n  - {time_s: 0.0, gas: true, brake: false}\n  - {time_s: 2.0, gas: false, brake: false}\n";
        let script = DriveScript::from_yaml(yaml).unwrap();
        assert_eq!(script.dt_s, DEFAULT_DT_S);
        assert_eq!(script.n_ticks(), 100);
    }

    #[test]
    fn test_validation() {
        assert!(DriveScript::launch(5.0).is_valid());
        assert!(DriveScript::launch_then_brake(3.0, 1.0, 2.0).is_valid());
        assert!(!DriveScript::launch(0.0).is_valid());
        assert!(DriveScript::new("empty", 0.02, vec![]).is_err());
        assert!(DriveScript::new("zero step", 0.0, DriveScript::launch(1.0).events).is_err());

        let unsorted = vec![
            PedalEvent::new(0.0, PedalIntent::GAS),
            PedalEvent::new(3.0, PedalIntent::BRAKE),
            PedalEvent::new(2.0, PedalIntent::RELEASED),
        ];
        let err = DriveScript::new("unsorted", 0.02, unsorted).unwrap_err();
        assert!(format!("{err:?}").contains("non-decreasing"));

        let negative = vec![
            PedalEvent::new(-1.0, PedalIntent::GAS),
            PedalEvent::new(2.0, PedalIntent::RELEASED),
        ];
        assert!(DriveScript::new("negative", 0.02, negative).is_err());
    }

    #[test]
    fn test_rejects_runaway_duration() {
        let err = DriveScript::new("forever", 0.02, DriveScript::launch(1e12).events).unwrap_err();
        assert!(format!("{err:?}").contains("ticks"));
        let longest = MAX_TICKS as f64 * DEFAULT_DT_S * 0.999;
        assert!(DriveScript::launch(longest).is_valid());
        assert!(!DriveScript::launch(longest * 1.01).is_valid());
        // a tiny step over a modest duration is caught too
        assert!(DriveScript::new("fine", 1e-9, DriveScript::launch(60.0).events).is_err());
    }

    #[test]
    fn test_launch_then_brake_timing() {
        let script = DriveScript::launch_then_brake(3.0, 1.0, 2.0);
        assert_eq!(script.duration_s(), 6.0);
        assert_eq!(script.intent_at(2.9), PedalIntent::GAS);
        assert_eq!(script.intent_at(3.5), PedalIntent::RELEASED);
        assert_eq!(script.intent_at(4.0), PedalIntent::BRAKE);
        assert_eq!(script.intent_at(6.0), PedalIntent::RELEASED);
    }
}
