use super::UpdateSettings;
use crate::algebra::*;

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

impl<T> UpdateSettings<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Writes the settings to `file` as JSON.
    pub fn save_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Reads settings written by [`save_to_file`](Self::save_to_file).
    /// Missing fields take their default values.  Settings that fail
    /// validation are reported as [`io::ErrorKind::InvalidData`].
    pub fn load_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let settings: UpdateSettings<T> = serde_json::from_str(&buffer)?;

        settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }
}

#[test]
fn test_json_io() {
    use super::UpdateSettingsBuilder;
    use std::io::{Seek, SeekFrom};

    let settings = UpdateSettingsBuilder::<f64>::default()
        .column_processing("sequential".to_string())
        .pd_tolerance(1e-12)
        .build()
        .unwrap();

    let mut file = tempfile::tempfile().unwrap();
    settings.save_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let settings2 = UpdateSettings::<f64>::load_from_file(&mut file).unwrap();
    assert_eq!(settings, settings2);
}

#[test]
fn test_json_invalid() {
    use std::io::{Seek, SeekFrom};

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(br#"{"column_processing": "blocked"}"#).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = UpdateSettings::<f64>::load_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
