use std::fs;
use std::path::Path;

use gostop_bench::config::BenchmarkConfig;
use gostop_bench::tournament::TournamentRunner;
use tempfile::tempdir;

fn load_config(output_dir: &Path, swap_seats: bool) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
deals:
  seed: 4242
  rounds: 3
  swap_seats: {swap_seats}
agents:
  - name: "greedy"
    difficulty: "normal"
  - name: "lookahead"
    difficulty: "impossible"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("rounds.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

/// Rows with the wall-clock field zeroed so two runs can be compared.
fn normalized_rows(path: &Path) -> Vec<serde_json::Value> {
    let jsonl = fs::read_to_string(path).expect("jsonl readable");
    jsonl
        .lines()
        .map(|line| {
            let mut value: serde_json::Value =
                serde_json::from_str(line).expect("row decodes to JSON");
            if let Some(obj) = value.as_object_mut() {
                obj.insert("speed_ms_decision".to_string(), serde_json::json!(0));
            }
            value
        })
        .collect()
}

#[test]
fn tournament_writes_two_rows_per_seating() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), true);
    let outputs = config.resolved_outputs();

    let runner = TournamentRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("tournament completes");

    assert_eq!(summary.rounds_played, 3);
    assert_eq!(summary.seatings, 2);
    assert_eq!(summary.rows_written, 12);
    assert!(summary.telemetry_path.is_none());

    let rows = normalized_rows(&summary.jsonl_path);
    assert_eq!(rows.len(), 12);
    for pair in rows.chunks(2) {
        assert_eq!(pair[0]["deal_id"], pair[1]["deal_id"]);
        assert_eq!(pair[0]["side"], "player");
        assert_eq!(pair[1]["side"], "opponent");
        assert_eq!(pair[0]["bot"], pair[1]["opponent"]);
        let net = pair[0]["payout"].as_i64().expect("payout") + pair[1]["payout"].as_i64().expect("payout");
        assert_eq!(net, 0, "payouts must cancel out");
    }

    for agent in summary.standings.agents() {
        assert_eq!(agent.rounds, 6);
        assert_eq!(agent.wins + agent.losses + agent.draws, 6);
    }
    let [first, second] = summary.standings.agents() else {
        panic!("two agents expected");
    };
    assert_eq!(first.wins, second.losses);
    assert_eq!(first.draws, second.draws);
    assert_eq!(first.net_payout(), -second.net_payout());

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| greedy | normal |"));
    assert!(markdown.contains("| lookahead | impossible |"));
}

#[test]
fn same_seed_reproduces_the_same_rows() {
    let first_dir = tempdir().expect("temp dir");
    let second_dir = tempdir().expect("temp dir");

    let mut runs = Vec::new();
    for dir in [first_dir.path(), second_dir.path()] {
        let config = load_config(dir, false);
        let outputs = config.resolved_outputs();
        let summary = TournamentRunner::new(config, outputs)
            .expect("runner created")
            .run()
            .expect("tournament completes");
        assert_eq!(summary.rows_written, 6);
        runs.push(normalized_rows(&summary.jsonl_path));
    }

    assert_eq!(runs[0], runs[1]);
}
