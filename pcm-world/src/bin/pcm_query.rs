//! Query a PCM scene from the command line.
//!
//! Loads a YAML scene and prints what an observer at the given pose sees:
//! the nearest lane mark, the nearest static objects and the nearest
//! opposing agent with its visible share.
//!
//! # Usage
//!
//! ```bash
//! # Unconstrained view from (0, 1.75)
//! pcm-query --scene scene.yaml --x 0 --y 1.75
//!
//! # Driver heading east looking back through a 90° window
//! pcm-query --scene scene.yaml --x 0 --y 1.75 --yaw 0 --view back --range 1.5708
//!
//! # Raw view direction in radians
//! pcm-query --scene scene.yaml --x 0 --y 1.75 --direction 3.1416 --range 0
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pcm_world::query::visible_fraction;
use pcm_world::{AgentViewDirection, MarkType, ObjectType, PcmData, Point};

/// Nearest-feature queries against a PCM scene
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (YAML)
    #[arg(short, long)]
    scene: PathBuf,

    /// Observer x position (m)
    #[arg(long, allow_hyphen_values = true)]
    x: f64,

    /// Observer y position (m)
    #[arg(long, allow_hyphen_values = true)]
    y: f64,

    /// Observer heading (rad), used with --view
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw: f64,

    /// View direction relative to the heading
    #[arg(long, value_enum, default_value_t = AgentViewDirection::None)]
    view: AgentViewDirection,

    /// Global view direction (rad); overrides --view
    #[arg(long, allow_hyphen_values = true)]
    direction: Option<f64>,

    /// Full width of the view window (rad); 0 is a sight line
    #[arg(long, default_value_t = 0.0)]
    range: f64,

    /// Restrict the mark query to one mark type
    #[arg(long, value_enum, default_value_t = MarkType::None)]
    mark: MarkType,

    /// Id of the observing agent, excluded from agent queries
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    ego: i64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scene = match PcmData::from_yaml_file(&args.scene) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to load {}: {} [{}]", args.scene.display(), e, e.code());
            return ExitCode::FAILURE;
        }
    };

    let observer = Point::xy(args.x, args.y);
    let direction = args
        .direction
        .unwrap_or_else(|| args.view.to_global_radians(args.yaw));
    let range = args.range;

    println!(
        "Observer ({:.3}, {:.3}), direction {:.4}, range {:.4}",
        observer.x(),
        observer.y(),
        direction,
        range
    );

    let nearest_type = scene.mark_type_of_nearest_line_segment(&observer, direction, range);
    let mark = scene.nearest_line_segment_of_marks(args.mark, &observer, direction, range);
    let mark_distance = scene.distance_to_nearest_mark(args.mark, &observer, direction, range);
    println!("Nearest mark type: {}", nearest_type);
    if mark.is_valid() {
        println!(
            "Nearest {} mark: ({:.3}, {:.3}) -> ({:.3}, {:.3}), distance {:.3}",
            args.mark,
            mark.first().x(),
            mark.first().y(),
            mark.second().x(),
            mark.second().y(),
            mark_distance
        );
    } else {
        println!("Nearest {} mark: none", args.mark);
    }

    for object_type in [ObjectType::Object, ObjectType::ViewObject] {
        match scene.nearest_line_segment_of_object(object_type, &observer, direction, range) {
            Ok(segment) if segment.is_valid() => {
                let point = segment.nearest_point_from_point(&observer, direction, range);
                println!(
                    "Nearest {}: ({:.3}, {:.3}), distance {:.3}",
                    object_type,
                    point.x(),
                    point.y(),
                    observer.distance_to(&point)
                );
            }
            Ok(_) => println!("Nearest {}: none", object_type),
            Err(e) => log::warn!("{}", e),
        }
    }

    let detection = scene.nearest_agent(args.ego, &observer, direction, range);
    if detection.is_detected() {
        let share = visible_fraction(
            &scene,
            args.ego,
            &observer,
            direction,
            range,
            detection.agent_id,
        );
        println!(
            "Nearest agent: {} at {:.3} m, {:.0}% visible",
            detection.agent_id,
            detection.distance,
            share * 100.0
        );
    } else {
        println!("Nearest agent: none");
    }

    ExitCode::SUCCESS
}
