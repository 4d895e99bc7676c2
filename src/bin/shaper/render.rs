use std::fmt::Write as _;

use serde::Serialize;
use shaper::Result;
use shaper::error::Error as ShaperError;
use shaper::sim::{SimSummary, TickRecord};

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| ShaperError::Encode(err.to_string()))
}

/// Render the per-tick log as an aligned table. The `Leaked` column only
/// appears when the records carry one, i.e. for the discrete-drain run.
pub fn table(records: &[TickRecord]) -> String {
    let show_leaked = records.iter().any(|record| record.leaked.is_some());
    let mut out = String::new();

    if show_leaked {
        let _ = writeln!(
            out,
            "{:<4}  {:>7}  {:>7}  {:>7}  {:>7}  {:>13}",
            "Tick", "Added", "Dropped", "Level", "Leaked", "Total dropped"
        );
    } else {
        let _ = writeln!(
            out,
            "{:<4}  {:>7}  {:>7}  {:>7}  {:>13}",
            "Tick", "Added", "Dropped", "Level", "Total dropped"
        );
    }

    for record in records {
        if let Some(leaked) = record.leaked {
            let _ = writeln!(
                out,
                "{:<4}  {:>7.2}  {:>7.2}  {:>7.2}  {:>7.2}  {:>13.2}",
                record.tick, record.added, record.dropped, record.level, leaked,
                record.total_dropped
            );
        } else {
            let _ = writeln!(
                out,
                "{:<4}  {:>7.2}  {:>7.2}  {:>7.2}  {:>13.2}",
                record.tick, record.added, record.dropped, record.level, record.total_dropped
            );
        }
    }
    out
}

pub fn summary(summary: &SimSummary) -> String {
    format!(
        "Ticks run:     {}\nTotal added:   {:.2}\nTotal dropped: {:.2}\nFinal level:   {:.2}\n",
        summary.ticks, summary.total_added, summary.total_dropped, summary.final_level
    )
}

#[cfg(test)]
mod tests {
    use super::{summary, table, to_json};
    use insta::assert_snapshot;
    use shaper::bucket::BucketConfig;
    use shaper::sim::Simulation;
    use shaper::types::Algorithm;
    use std::time::Duration;

    fn run(algorithm: Algorithm, ticks: usize) -> (Vec<shaper::sim::TickRecord>, Simulation) {
        let config = BucketConfig::new(20.0, 5.0).unwrap();
        let mut sim = Simulation::new(algorithm, config, Duration::from_secs(1));
        let records = (0..ticks).map(|_| sim.step(10.0).unwrap()).collect();
        (records, sim)
    }

    #[test]
    fn leaky_table_has_a_leaked_column() {
        let (records, _) = run(Algorithm::Leaky, 4);
        assert_snapshot!(table(&records), @r"
        Tick    Added  Dropped    Level   Leaked  Total dropped
        1       10.00     0.00     5.00     5.00           0.00
        2       10.00     0.00    10.00     5.00           0.00
        3       10.00     0.00    15.00     5.00           0.00
        4       10.00     5.00    15.00     5.00           5.00
        ");
    }

    #[test]
    fn token_table_has_no_leaked_column() {
        let (records, _) = run(Algorithm::Token, 3);
        assert_snapshot!(table(&records), @r"
        Tick    Added  Dropped    Level  Total dropped
        1       10.00     5.00     0.00           5.00
        2       10.00     5.00     0.00          10.00
        3       10.00     5.00     0.00          15.00
        ");
    }

    #[test]
    fn summary_lists_run_totals() {
        let (_, sim) = run(Algorithm::Leaky, 4);
        assert_snapshot!(summary(&sim.summary()), @r"
        Ticks run:     4
        Total added:   40.00
        Total dropped: 5.00
        Final level:   15.00
        ");
    }

    #[test]
    fn records_serialize_to_flat_json() {
        let (records, _) = run(Algorithm::Leaky, 1);
        assert_eq!(
            to_json(&records[0]).unwrap(),
            r#"{"tick":1,"added":10.0,"dropped":0.0,"level":5.0,"leaked":5.0,"total_dropped":0.0}"#
        );

        let (records, _) = run(Algorithm::Token, 1);
        assert_eq!(
            to_json(&records[0]).unwrap(),
            r#"{"tick":1,"added":10.0,"dropped":5.0,"level":0.0,"total_dropped":5.0}"#
        );
    }
}
