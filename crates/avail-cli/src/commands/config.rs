//! Config command for printing the effective configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;

/// Writes the configuration, after all layers are applied, as JSON.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, config)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use insta::assert_snapshot;

    #[test]
    fn config_command_prints_effective_values() {
        let config = Config {
            start_time: "09:00".to_string(),
            end_time: "17:30".to_string(),
            minimum_slot_minutes: 25,
            timezone: Some("Europe/Paris".to_string()),
            events_path: PathBuf::from("/srv/calendar/events.json"),
        };

        let mut output = Vec::new();
        run(&mut output, &config).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r#"
        {
          "start_time": "09:00",
          "end_time": "17:30",
          "minimum_slot_minutes": 25,
          "timezone": "Europe/Paris",
          "events_path": "/srv/calendar/events.json"
        }
        "#);
    }
}
