use cell_refine::config::refine_demo::{self, RefineDemoConfig};
use cell_refine::image::io::{load_channel_f32, save_grayscale_u8, save_rgb8, write_json_file};
use cell_refine::score::ScoringField;
use cell_refine::session::{Command, Session};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = refine_demo::load_config(Path::new(&config_path))?;

    let field = load_channel_f32(&config.input, config.scoring_channel)?;
    let scoring = ScoringField::new(field).map_err(|e| e.to_string())?;
    let mut session = Session::new(scoring, config.seeds.clone(), config.session.clone())
        .with_refine_options(config.refine.clone());
    let mut minimizer = config.refine.compass();

    print_state("initial", &session);
    for command in config.command_script() {
        let keep_going = session.apply(&command, &mut minimizer);
        if matches!(command, Command::Refine) {
            if let Some(report) = session.refinements().last() {
                println!(
                    "refine: score {:.3} -> {:.3} ({} evals, applied={})",
                    report.initial_score, report.final_score, report.evaluations, report.applied
                );
            }
        }
        if !keep_going {
            break;
        }
    }
    print_state("final", &session);

    write_outputs(&config, &session)
}

fn print_state(label: &str, session: &Session) {
    let report = session.last_recompute();
    println!(
        "{label}: seeds={} width={} score={:.3} boundary_segments={} ({:.2} ms)",
        report.seed_count,
        report.edge_gradient_width,
        report.score,
        report.boundary_segments,
        report.timings.total_ms
    );
}

fn write_outputs(config: &RefineDemoConfig, session: &Session) -> Result<(), String> {
    if let Some(path) = &config.output.composite_image {
        save_rgb8(&session.compose_display(), path)?;
        println!("Saved composite to {}", path.display());
    }
    if let Some(path) = &config.output.edge_field_image {
        save_grayscale_u8(&session.edge_field().display(), path)?;
        println!("Saved edge field to {}", path.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &session.report())?;
        println!("Saved session report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: refine_demo <config.json>".to_string()
}
