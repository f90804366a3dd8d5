mod common;

use cell_refine::config::refine_demo::load_config;
use cell_refine::diagnostics::SessionReport;
use cell_refine::image::io::{load_channel_f32, save_rgb8, write_json_file};
use cell_refine::score::ScoringField;
use cell_refine::session::Session;
use cell_refine::types::Bounds;
use common::synthetic::{grid_seeds, membrane_rgb};
use std::fs;
use std::path::PathBuf;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("cell_refine_e2e_{}", std::process::id()))
}

#[test]
fn scripted_session_from_config_writes_outputs() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = scratch_dir();
    let bounds = Bounds::new(96, 64).expect("valid bounds");
    let truth = grid_seeds(bounds, 2, 2);
    let image_path = dir.join("cells.png");
    save_rgb8(&membrane_rgb(bounds, &truth, 2), &image_path).expect("write input image");

    let seeds: Vec<_> = truth
        .iter()
        .map(|p| serde_json::json!({"x": p.x + 3.0, "y": p.y - 2.0}))
        .collect();
    let config_json = serde_json::json!({
        "input": image_path,
        "scoring_channel": 0,
        "seeds": seeds,
        "session": {"edge_gradient_width": 4},
        "refine": {"max_evals": 1500},
        "commands": [{"setEdgeGradientWidth": 3}, "refine"],
        "keys": "\tdq",
        "output": {
            "composite_image": dir.join("out/composite.png"),
            "edge_field_image": dir.join("out/edge.png"),
            "report_json": dir.join("out/report.json")
        }
    });
    let config_path = dir.join("config.json");
    write_json_file(&config_path, &config_json).expect("write config");

    let config = load_config(&config_path).expect("load config");
    let field = load_channel_f32(&config.input, config.scoring_channel).expect("load channel");
    let scoring = ScoringField::new(field).expect("valid field");
    let mut session = Session::new(scoring, config.seeds.clone(), config.session.clone())
        .with_refine_options(config.refine.clone());
    let mut search = config.refine.compass();

    let initial = session.score();
    let script = config.command_script();
    assert_eq!(script.len(), 5);
    let mut applied = 0;
    for command in &script {
        applied += 1;
        if !session.apply(command, &mut search) {
            break;
        }
    }
    assert_eq!(applied, 5);
    assert_eq!(session.edge_gradient_width(), 3);
    assert_eq!(session.seeds().selected(), Some(1));
    let refinement = &session.refinements()[0];
    assert!(refinement.final_score >= refinement.initial_score);

    let out = config.output.composite_image.as_ref().expect("composite path");
    save_rgb8(&session.compose_display(), out).expect("write composite");
    let report_path = config.output.report_json.as_ref().expect("report path");
    write_json_file(report_path, &session.report()).expect("write report");

    let text = fs::read_to_string(report_path).expect("read report");
    let report: SessionReport = serde_json::from_str(&text).expect("parse report");
    assert_eq!(report.seeds.len(), 4);
    assert_eq!(report.commands_applied, 5);
    assert_eq!(report.refinements.len(), 1);
    assert!(initial.is_finite());

    let _ = fs::remove_dir_all(&dir);
}
