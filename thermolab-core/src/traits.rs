use crate::imports::*;

/// Lower-cased format key with any leading dot removed, e.g. ".YML" -> "yml"
fn format_key(format: &str) -> String {
    format.trim_start_matches('.').to_lowercase()
}

fn extension_of(filepath: &Path) -> anyhow::Result<&str> {
    filepath
        .extension()
        .and_then(OsStr::to_str)
        .with_context(|| format!("File extension could not be parsed: {filepath:?}"))
}

/// Read/write support for configuration objects (vehicle specs, simulation
/// parameters, drive scripts). Formats are picked by file extension or by an
/// explicit format key.
pub trait SerdeAPI: Serialize + for<'a> Deserialize<'a> {
    const ACCEPTED_BYTE_FORMATS: &'static [&'static str] = &["yaml", "json"];
    const ACCEPTED_STR_FORMATS: &'static [&'static str] = &["yaml", "json"];

    /// Runs after every deserialization, e.g. validation
    fn init(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Writes `self` to `filepath`, creating or truncating the file.
    /// The extension must be one of [`ACCEPTED_BYTE_FORMATS`](`SerdeAPI::ACCEPTED_BYTE_FORMATS`).
    fn to_file<P: AsRef<Path>>(&self, filepath: P) -> anyhow::Result<()> {
        let filepath = filepath.as_ref();
        let format = extension_of(filepath)?;
        let file = File::create(filepath)
            .with_context(|| format!("Could not create file: {filepath:?}"))?;
        self.to_writer(file, format)
    }

    fn to_writer<W: std::io::Write>(&self, wtr: W, format: &str) -> anyhow::Result<()> {
        match format_key(format).as_str() {
            "yaml" | "yml" => serde_yaml::to_writer(wtr, self)?,
            "json" => serde_json::to_writer(wtr, self)?,
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        }
        Ok(())
    }

    /// Reads an object from `filepath`, picking the format from its extension
    fn from_file<P: AsRef<Path>>(filepath: P) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let format = extension_of(filepath)?;
        let file = File::open(filepath).with_context(|| {
            if filepath.exists() {
                format!("Could not open file: {filepath:?}")
            } else {
                format!("File not found: {filepath:?}")
            }
        })?;
        Self::from_reader(file, format)
    }

    /// Serializes into a string of the given `format`
    fn to_str(&self, format: &str) -> anyhow::Result<String> {
        match format_key(format).as_str() {
            "yaml" | "yml" => self.to_yaml(),
            "json" => self.to_json(),
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_STR_FORMATS
            ),
        }
    }

    /// Deserializes from `contents` written in `format`
    fn from_str<S: AsRef<str>>(contents: S, format: &str) -> anyhow::Result<Self> {
        match format_key(format).as_str() {
            "yaml" | "yml" => Self::from_yaml(contents),
            "json" => Self::from_json(contents),
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_STR_FORMATS
            ),
        }
    }

    /// Deserializes from any [`std::io::Read`] and runs [`SerdeAPI::init`]
    fn from_reader<R: std::io::Read>(rdr: R, format: &str) -> anyhow::Result<Self> {
        let mut deserialized: Self = match format_key(format).as_str() {
            "yaml" | "yml" => serde_yaml::from_reader(rdr)?,
            "json" => serde_json::from_reader(rdr)?,
            _ => bail!(
                "Unsupported format {format:?}, must be one of {:?}",
                Self::ACCEPTED_BYTE_FORMATS
            ),
        };
        deserialized.init()?;
        Ok(deserialized)
    }

    fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(&self)?)
    }

    fn from_json<S: AsRef<str>>(json_str: S) -> anyhow::Result<Self> {
        let mut json_de: Self = serde_json::from_str(json_str.as_ref())?;
        json_de.init()?;
        Ok(json_de)
    }

    fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(&self)?)
    }

    fn from_yaml<S: AsRef<str>>(yaml_str: S) -> anyhow::Result<Self> {
        let mut yaml_de: Self = serde_yaml::from_str(yaml_str.as_ref())?;
        yaml_de.init()?;
        Ok(yaml_de)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive_script::DriveScript;
    use crate::vehicle::VehicleSpec;

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(".YML"), "yml");
        assert_eq!(format_key("json"), "json");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut veh = VehicleSpec::default();
        veh.name = "Test EV".into();
        veh.mass_kg = 2100.0;
        for file_name in ["veh.yaml", "veh.yml", "veh.json"] {
            let path = dir.path().join(file_name);
            veh.to_file(&path).unwrap();
            assert_eq!(VehicleSpec::from_file(&path).unwrap(), veh);
        }

        let params = SimParams {
            save_history: true,
            ..Default::default()
        };
        let path = dir.path().join("params.json");
        params.to_file(&path).unwrap();
        assert_eq!(SimParams::from_file(&path).unwrap(), params);

        let script = DriveScript::launch_then_brake(2.0, 1.0, 1.5);
        let path = dir.path().join("script.csv");
        script.to_file(&path).unwrap();
        let loaded = DriveScript::from_csv_file(&path).unwrap();
        assert_eq!(loaded.events, script.events);
        assert_eq!(loaded.name, "script");
    }

    #[test]
    fn test_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let veh = VehicleSpec::default();
        assert!(veh.to_file(dir.path().join("veh.toml")).is_err());
        assert!(veh.to_file(dir.path().join("no_extension")).is_err());
        let err = VehicleSpec::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(format!("{err:?}").contains("File not found"));
    }
}
