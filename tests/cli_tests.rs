use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    netlist_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let netlist_path = dir.path().join("ring12.txt");

        // 12 cells on a 3x5 grid: a ring plus two wide nets
        let mut f = File::create(&netlist_path).unwrap();
        writeln!(f, "12 14 3 5").unwrap();
        for i in 0..12 {
            writeln!(f, "2 {} {}", i, (i + 1) % 12).unwrap();
        }
        writeln!(f, "4 0 3 6 9").unwrap();
        writeln!(f, "3 1 5 11").unwrap();

        Self { dir, netlist_path }
    }
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cellforge"))
        .args(args)
        .output()
        .expect("Failed to execute cellforge")
}

fn extract_cost(stdout: &str, label: &str) -> u64 {
    let re = Regex::new(&format!(r"{}: (\d+)", label)).unwrap();
    re.captures(stdout)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or_else(|| panic!("no '{}' in output:\n{}", label, stdout))
}

#[test]
fn test_place_run_improves_or_holds() {
    let ctx = TestContext::new();
    let output = run_cli(&[
        "place",
        "--netlist",
        ctx.netlist_path.to_str().unwrap(),
        "--population-size",
        "20",
        "--generations",
        "300",
        "--mutation-factor",
        "4",
        "--seed",
        "7",
    ]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let initial = extract_cost(&stdout, "Initial cost");
    let final_cost = extract_cost(&stdout, "Final cost");
    assert!(final_cost <= initial, "{} > {}", final_cost, initial);
    // A ring of 12 can never be shorter than 12 unit steps
    assert!(final_cost >= 12);
}

#[test]
fn test_partition_seed_is_reproducible() {
    let ctx = TestContext::new();
    let args = [
        "partition",
        "--netlist",
        ctx.netlist_path.to_str().unwrap(),
        "--generations",
        "200",
        "--seed",
        "99",
    ];

    let a = String::from_utf8_lossy(&run_cli(&args).stdout).to_string();
    let b = String::from_utf8_lossy(&run_cli(&args).stdout).to_string();
    assert_eq!(extract_cost(&a, "Final cost"), extract_cost(&b, "Final cost"));
}

#[test]
fn test_json_output() {
    let ctx = TestContext::new();
    let out_path = ctx.dir.path().join("result.json");
    let output = run_cli(&[
        "partition",
        "--netlist",
        ctx.netlist_path.to_str().unwrap(),
        "--generations",
        "50",
        "--seed",
        "3",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    let result = &json[0];
    assert_eq!(result["problem"], "partition");
    assert_eq!(result["generations"], 50);
    assert_eq!(
        result["final_cost"].as_u64().unwrap(),
        result["best"]["cost"].as_u64().unwrap()
    );
    assert_eq!(result["best"]["solution"]["partition"].as_array().unwrap().len(), 12);
}

#[test]
fn test_config_file_overrides_flags() {
    let ctx = TestContext::new();
    let cfg_path = ctx.dir.path().join("run.json");
    let out_path = ctx.dir.path().join("result.json");
    std::fs::write(
        &cfg_path,
        r#"{"search": {"population_size": 6, "generations": 12, "mutation_factor": 3}}"#,
    )
    .unwrap();

    let output = run_cli(&[
        "place",
        "--netlist",
        ctx.netlist_path.to_str().unwrap(),
        "--config-file",
        cfg_path.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json[0]["config"]["search"]["population_size"], 6);
    assert_eq!(json[0]["generations"], 12);
}

fn write_chain(ctx: &TestContext) -> PathBuf {
    // 8 cells in a line on a 3x3 grid
    let path = ctx.dir.path().join("chain8.txt");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "8 7 3 3").unwrap();
    for i in 0..7 {
        writeln!(f, "2 {} {}", i, i + 1).unwrap();
    }
    path
}

#[test]
fn test_several_netlists_share_one_run() {
    let ctx = TestContext::new();
    let chain = write_chain(&ctx);
    let out_path = ctx.dir.path().join("batch.json");
    let output = run_cli(&[
        "place",
        "--netlist",
        ctx.netlist_path.to_str().unwrap(),
        chain.to_str().unwrap(),
        "--generations",
        "40",
        "--seed",
        "5",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(Regex::new(r"Final cost: \d+").unwrap().find_iter(&stdout).count(), 2);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0]["netlist"].as_str().unwrap().ends_with("ring12.txt"));
    assert!(results[1]["netlist"].as_str().unwrap().ends_with("chain8.txt"));
    assert_eq!(results[0]["best"]["solution"]["placement"].as_array().unwrap().len(), 12);
    assert_eq!(results[1]["best"]["solution"]["placement"].as_array().unwrap().len(), 8);
    // Each circuit restarts the generation count
    assert_eq!(results[1]["generations"], 40);
    // Seven unit-length nets at best
    assert!(results[1]["final_cost"].as_u64().unwrap() >= 7);
}

#[test]
fn test_netlist_directory_runs_every_txt_file() {
    let ctx = TestContext::new();
    write_chain(&ctx);
    std::fs::write(ctx.dir.path().join("notes.md"), "not a netlist").unwrap();
    let out_path = ctx.dir.path().join("dir.json");

    let output = run_cli(&[
        "partition",
        "--netlist",
        ctx.dir.path().to_str().unwrap(),
        "--generations",
        "20",
        "--seed",
        "1",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{:?}", output);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["netlist"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("chain8.txt"));
    assert!(names[1].ends_with("ring12.txt"));
}

#[test]
fn test_bad_netlist_fails() {
    let ctx = TestContext::new();
    let bad = ctx.dir.path().join("bad.txt");
    std::fs::write(&bad, "3 1\n2 0 7\n").unwrap();

    let output = run_cli(&["partition", "--netlist", bad.to_str().unwrap()]);
    assert!(!output.status.success());
}
