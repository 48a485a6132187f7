//! CLI contract tests
//!
//! Runs the built binary against temp directories so no stray
//! proofdrop.toml from the working tree is picked up.

use std::path::Path;
use std::process::Command;

const ADDRESS: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";

fn proofdrop_bin() -> String {
    env!("CARGO_BIN_EXE_proofdrop").to_string()
}

fn run_in(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(proofdrop_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("PROOFDROP_CONFIG")
        .output()
        .expect("Failed to run proofdrop");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn json_of(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}

#[test]
fn test_score_flags_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &[
            "score",
            "--governance-votes",
            "3",
            "--defi-tx",
            "5",
            "--unique-contracts",
            "10",
            "--airdrops-claimed",
            "3",
            "--dex-swaps",
            "15",
            "--balance-usd",
            "50",
            "--format",
            "json",
        ],
    );
    assert_eq!(code, 0);
    let json = json_of(&stdout);
    assert_eq!(json["chains"][0]["result"]["total"], 65);
    assert_eq!(json["chains"][0]["result"]["tier"], "Silver");
    assert!(json.get("summary").is_none());
}

#[test]
fn test_score_missing_flags_default_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &["score", "--governance-votes", "5", "--format", "json"],
    );
    assert_eq!(code, 0);
    let json = json_of(&stdout);
    assert_eq!(json["chains"][0]["result"]["total"], 20);
    assert_eq!(json["chains"][0]["result"]["points"]["balance"], 0);
}

#[test]
fn test_score_without_metrics_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["score"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No metrics given"), "{stderr}");
}

#[test]
fn test_score_metrics_file_multi_chain() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("metrics.json");
    std::fs::write(
        &file,
        r#"{
  "address": "0xabc",
  "chains": [
    {"chain": "sepolia", "metrics": {"governanceVotes": 5, "defiTx": 10, "uniqueContracts": 25,
                                     "airdropsClaimed": 5, "dexSwaps": 30, "balanceUSD": 300}},
    {"chain": "baseSepolia", "metrics": {}}
  ]
}"#,
    )
    .unwrap();

    let (code, stdout, _) = run_in(
        dir.path(),
        &["score", "--metrics", "metrics.json", "--format", "json"],
    );
    assert_eq!(code, 0);
    let json = json_of(&stdout);
    assert_eq!(json["address"], "0xabc");
    assert_eq!(json["chains"][0]["result"]["total"], 100);
    assert_eq!(json["chains"][0]["result"]["tier"], "Platinum");
    assert_eq!(json["chains"][1]["result"]["total"], 0);
    assert_eq!(json["summary"]["total"], 50);
    assert_eq!(json["summary"]["tier"], "Silver");
}

#[test]
fn test_score_rejects_negative_balance() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("m.toml"), "balance_usd = -1.0\n").unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["score", "--metrics", "m.toml"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("balance_usd"), "{stderr}");
}

#[test]
fn test_simulate_default_chains() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["simulate", ADDRESS, "--format", "json"]);
    assert_eq!(code, 0);
    let json = json_of(&stdout);
    let totals: Vec<u64> = json["chains"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["result"]["total"].as_u64().unwrap())
        .collect();
    assert_eq!(totals, vec![45, 55, 60, 35]);
    assert_eq!(json["summary"]["total"], 49);
    assert_eq!(json["summary"]["tier"], "Bronze");
}

#[test]
fn test_simulate_with_balance_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &[
            "simulate",
            ADDRESS,
            "--balance",
            "sepolia=0.1",
            "--format",
            "json",
            "--output",
            "report.json",
        ],
    );
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let json = json_of(&written);
    assert_eq!(json["chains"][0]["result"]["total"], 60);
    assert_eq!(json["summary"]["total"], 53);
    assert_eq!(json["summary"]["tier"], "Silver");
}

#[test]
fn test_simulate_unknown_chain_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["simulate", ADDRESS, "--chains", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown chain"), "{stderr}");
}

#[test]
fn test_project_config_changes_prices_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("proofdrop.toml"),
        "[prices]\nETH = 1000.0\n\n[defaults]\nformat = \"json\"\nchains = [\"sepolia\"]\n",
    )
    .unwrap();
    // 0.1 ETH at $1000 is $100: 10 balance points instead of 15
    let (code, stdout, _) = run_in(dir.path(), &["simulate", ADDRESS, "--balance", "sepolia=0.1"]);
    assert_eq!(code, 0);
    let json = json_of(&stdout);
    assert_eq!(json["chains"].as_array().unwrap().len(), 1);
    assert_eq!(json["chains"][0]["result"]["points"]["balance"], 10);
    assert_eq!(json["chains"][0]["result"]["total"], 55);
}

#[test]
fn test_explicit_bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[prices]\nETH = -3.0\n").unwrap();
    let (code, _, _) = run_in(dir.path(), &["--config", "bad.toml", "chains"]);
    assert_ne!(code, 0);
}

#[test]
fn test_proof_verification_message() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &[
            "proof",
            ADDRESS,
            "--chain-id",
            "sepolia",
            "--nonce",
            "42",
            "--timestamp",
            "2024-01-02T03:04:05Z",
        ],
    );
    assert_eq!(code, 0);
    let expected = format!(
        "ProofDrop — Wallet Verification\nAddress: {ADDRESS}\nChainId: 11155111\n\
Timestamp: 2024-01-02T03:04:05.000Z\nNonce: 42\n"
    );
    assert_eq!(stdout, expected);
}

#[test]
fn test_proof_reputation_message() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &[
            "proof",
            ADDRESS,
            "--simulate",
            "--chains",
            "sepolia,baseSepolia",
            "--nonce",
            "7",
            "--timestamp",
            "2024-01-02T03:04:05Z",
        ],
    );
    assert_eq!(code, 0);
    assert!(stdout.starts_with("ProofDrop Testnet Reputation Proof\n"));
    assert!(stdout.contains("- Ethereum Sepolia: score=45"));
    assert!(stdout.contains("- Base Sepolia: score=35"));
    assert!(stdout.contains("Total Score (avg): 40"));
    assert!(stdout.contains("Nonce: 7"));
}

#[test]
fn test_chains_json_lists_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["chains", "--json"]);
    assert_eq!(code, 0);
    let json = json_of(&stdout);
    let keys: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    for key in ["sepolia", "polygonAmoy", "arbitrumSepolia", "baseSepolia"] {
        assert!(keys.contains(&key), "missing {key}");
    }
}

#[test]
fn test_init_then_config_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_in(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("proofdrop.toml").exists());

    let (code, stdout, _) = run_in(dir.path(), &["simulate", ADDRESS]);
    assert_eq!(code, 0);
    assert!(stdout.contains("ProofDrop Reputation"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &[
            "--log-level",
            "debug",
            "simulate",
            ADDRESS,
            "--format",
            "json",
        ],
    );
    assert_eq!(code, 0);
    json_of(&stdout);
}

#[test]
fn test_score_wrapped_file_with_bad_entry_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("metrics.json"),
        r#"{"address": "0xabc", "chains": [
            {"chain": "sepolia", "metrics": {"governanceVotes": 5, "dexSwaps": -1}}]}"#,
    )
    .unwrap();
    let (code, stdout, stderr) = run_in(dir.path(), &["score", "--metrics", "metrics.json"]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("chains"), "{stderr}");
}

#[test]
fn test_score_misspelled_metric_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("metrics.toml"),
        "governance_vote = 5\ndefi_tx = 10\n",
    )
    .unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["score", "--metrics", "metrics.toml"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("governance_vote"), "{stderr}");
}

#[test]
fn test_min_tier_gates_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    // Default testnets average 49 (Bronze)
    let (code, stdout, _) = run_in(
        dir.path(),
        &["simulate", ADDRESS, "--format", "json", "--min-tier", "bronze"],
    );
    assert_eq!(code, 0);
    json_of(&stdout);

    let (code, stdout, stderr) = run_in(
        dir.path(),
        &["simulate", ADDRESS, "--format", "json", "--min-tier", "silver"],
    );
    assert_eq!(code, 1);
    // The report is still written before the gate fails
    assert_eq!(json_of(&stdout)["summary"]["total"], 49);
    assert!(stderr.contains("below --min-tier Silver"), "{stderr}");

    let (code, _, _) = run_in(
        dir.path(),
        &["score", "--governance-votes", "5", "--min-tier", "platinum"],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_simulate_rejects_overflowing_balance() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_in(
        dir.path(),
        &["simulate", ADDRESS, "--balance", "sepolia=1e308", "--format", "json"],
    );
    assert_ne!(code, 0);
    assert!(stdout.is_empty(), "{stdout}");
    assert!(stderr.contains("out of range"), "{stderr}");
}
