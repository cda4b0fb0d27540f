use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Tellere for én prosess. Eget register, så tester kan lage flere instanser.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub rows_read: IntCounter,
    pub rows_parsed: IntCounter,
    pub rows_skipped: IntCounter,
    pub invalid_numbers: IntCounter,
    pub weeks_added: IntCounter,
    pub weeks_updated: IntCounter,
    pub sets_kept: IntCounter,
    pub sets_filtered: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> prometheus::Result<IntCounter> {
    let c = IntCounter::new(name, help)?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new_custom(Some("healthlog".into()), None)?;
        Ok(Self {
            rows_read: counter(&registry, "rows_read_total", "Rader lest fra input")?,
            rows_parsed: counter(&registry, "rows_parsed_total", "Rader med gyldig dato")?,
            rows_skipped: counter(&registry, "rows_skipped_total", "Rader hoppet over")?,
            invalid_numbers: counter(
                &registry,
                "invalid_numbers_total",
                "Tallceller som ikke kunne tolkes",
            )?,
            weeks_added: counter(&registry, "weeks_added_total", "Nye uker i ukestabellen")?,
            weeks_updated: counter(&registry, "weeks_updated_total", "Uker som ble rettet")?,
            sets_kept: counter(&registry, "sets_kept_total", "Treningssett brukt i 1RM")?,
            sets_filtered: counter(
                &registry,
                "sets_filtered_total",
                "Treningssett filtrert bort",
            )?,
            registry,
        })
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_with_prefix() {
        let m = Metrics::new().unwrap();
        m.rows_read.inc_by(3);
        let text = m.render().unwrap();
        assert!(text.contains("healthlog_rows_read_total 3"));
    }
}
