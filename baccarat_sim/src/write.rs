use crate::SimulationSummary;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::sync::mpsc::Receiver;

/// The formats summaries can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One header line followed by one comma separated line per shoe.
    #[default]
    Csv,
    /// A single JSON array of summaries.
    Json,
}

/// Writes `summaries` to `writer` in the given format.
pub fn write(
    summaries: &[SimulationSummary],
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => {
            writeln!(writer, "{}", SimulationSummary::csv_header())?;
            for summary in summaries {
                writeln!(writer, "{}", summary.to_csv_row())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summaries)?;
            writeln!(writer)?;
        }
    }
    writer.flush()
}

/// Collects summaries sent over `receiver` until every simulation in `ids` has reported that it is done,
/// then writes them grouped by simulation id in ascending order.
pub fn write_summaries(
    receiver: Receiver<(Option<SimulationSummary>, usize)>,
    mut ids: HashSet<usize>,
    writer: impl Write,
    format: OutputFormat,
) -> io::Result<()> {
    let mut summaries: HashMap<usize, Vec<SimulationSummary>> = HashMap::new();
    while !ids.is_empty() {
        // Every sender hung up, nothing more will arrive
        let Ok((cur_summary, id)) = receiver.recv() else {
            break;
        };
        if let Some(cur_sum) = cur_summary {
            summaries.entry(id).or_default().push(cur_sum);
        } else {
            ids.remove(&id);
        }
    }

    let mut sorted: Vec<(usize, Vec<SimulationSummary>)> = summaries.into_iter().collect();
    sorted.sort_by_key(|(id, _)| *id);
    let ordered: Vec<SimulationSummary> = sorted.into_iter().flat_map(|(_, s)| s).collect();
    write(&ordered, format, writer)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    fn summary(label: &str, shoe: u32) -> SimulationSummary {
        SimulationSummary {
            label: label.to_string(),
            shoe,
            total_hands: 4,
            wins: 2,
            losses: 1,
            ties: 1,
            max_win_streak: 2,
            max_loss_streak: 1,
            max_tie_streak: 1,
            win_percentage: Some(0.5),
            loss_percentage: Some(0.25),
            tie_percentage: Some(0.25),
            max_bet: 20,
            bankroll: 1010,
            player_wins: 1,
            banker_wins: 2,
        }
    }

    #[test]
    fn test_write_csv() {
        let mut out = vec![];
        write(&[summary("a", 1)], OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "a,1,4,2,1,1,2,1,1,50.00%,25.00%,25.00%,20,1010");
    }

    #[test]
    fn test_write_json() {
        let mut out = vec![];
        write(&[summary("a", 1), summary("a", 2)], OutputFormat::Json, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["shoe"], 2);
        assert_eq!(rows[0]["win_percentage"], 0.5);
    }

    #[test]
    fn test_write_summaries_orders_by_id() {
        let (sender, receiver) = mpsc::channel();
        let ids: HashSet<usize> = [1, 2].into_iter().collect();
        let handle = thread::spawn(move || {
            let mut out = vec![];
            write_summaries(receiver, ids, &mut out, OutputFormat::Csv).map(|_| out)
        });

        sender.send((Some(summary("second", 1)), 2)).unwrap();
        sender.send((Some(summary("first", 1)), 1)).unwrap();
        sender.send((None, 2)).unwrap();
        sender.send((Some(summary("first", 2)), 1)).unwrap();
        sender.send((None, 1)).unwrap();

        let out = handle.join().unwrap().unwrap();
        let text = String::from_utf8(out).unwrap();
        let labels: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(labels, vec!["first", "first", "second"]);
    }

    #[test]
    fn test_write_summaries_stops_when_senders_drop() {
        let (sender, receiver) = mpsc::channel();
        sender.send((Some(summary("only", 1)), 1)).unwrap();
        drop(sender);
        let ids: HashSet<usize> = [1].into_iter().collect();
        let mut out = vec![];
        write_summaries(receiver, ids, &mut out, OutputFormat::Csv).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
