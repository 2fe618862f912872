use std::fs;
use std::io::Write;

use satsim::{
    load_scenario, resolve, validate_and_score, Judge, OrbitalMotion, RunParameters, SimulationData,
};
use tempfile::{tempdir, NamedTempFile};

// 衛星0は (100t, -15t) を、衛星1は (-3000-50t, 600-15t) を通る
const SCENARIO: &str = "\
100
2
0 0 100 200 1000
-3000 600 -50 100 500
4
50 2 1
1000 -150
2000 -300
0 99
10 1 1
100000 100000
0 99
20 1 1
5000 -750
0 10
5 1 1
-3500 450
0 99
";

fn load() -> SimulationData {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SCENARIO.as_bytes()).unwrap();
    load_scenario(file.path()).unwrap()
}

fn params(workers: usize) -> RunParameters {
    RunParameters {
        workers,
        ..RunParameters::default()
    }
}

#[test]
fn test_resolver_output_passes_judge() {
    for workers in 1..=4 {
        let mut data = load();
        let shots = resolve(&mut data, &OrbitalMotion, &params(workers));

        let dir = tempdir().unwrap();
        let path = dir.path().join("shots.out");
        shots.save(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert_eq!(text, "3\n1000 -150 1 0\n2000 -300 11 0\n-3500 450 1 1\n");

        let judge = Judge::new(&data, &OrbitalMotion, &text);
        assert_eq!(judge.check_syntax(), Ok(3));
        assert_eq!(judge.check_semantics(), Ok(()));
        assert_eq!(judge.check_feasibility(), Ok(()));

        assert_eq!(validate_and_score(&data, &OrbitalMotion, &text, &params(workers)), (true, 55));
    }
}

/// 到達できないコレクションは複数パスの後に無効化される
#[test]
fn test_unreachable_collections_invalidated() {
    let mut data = load();
    resolve(&mut data, &OrbitalMotion, &params(2));

    let validity: Vec<bool> = data.collections().iter().map(|c| c.is_valid()).collect();
    assert_eq!(validity, vec![true, false, false, true]);
}

#[test]
fn test_tampered_shot_list_rejected() {
    let data = load();

    // ターン11の撮影をターン40にずらすと視野外になる
    let out_of_view = "3\n1000 -150 1 0\n2000 -300 40 0\n-3500 450 1 1\n";
    assert_eq!(validate_and_score(&data, &OrbitalMotion, out_of_view, &params(1)), (false, 0));

    // 宣言数と行数の不一致
    let truncated = "3\n1000 -150 1 0\n2000 -300 11 0\n";
    assert_eq!(validate_and_score(&data, &OrbitalMotion, truncated, &params(1)), (false, 0));
}

#[test]
fn test_score_is_independent_of_validity() {
    let data = load();
    // 不正なターンでも得点計算は (la, lo) だけを見る
    let text = "2\n-3500 450 99 1\n1000 -150 0 0\n";
    let judge = Judge::new(&data, &OrbitalMotion, text);

    assert!(judge.check().is_err());
    assert_eq!(judge.score(), 5);
    assert_eq!(judge.score(), 5);
}
