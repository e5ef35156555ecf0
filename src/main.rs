// Copyright 2020 TwoCookingMice

use light_probe_builder::core::probe_store::ProbeStore;
use light_probe_builder::core::scene_loader::{load_scene, parse_float, parse_vec2i};
use light_probe_builder::io::probe_io::write_probes_to_file;

use std::env;
use std::process;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <scene.xml> <probes.txt> [--clear] [--no-grid] [--remove-outside] \
               [--terrain-grid X,Y] [--extent E]", program);
    process::exit(1);
}

fn fail(msg: String) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let mut load_result = load_scene(input_path).unwrap_or_else(|e| fail(e.to_string()));
    let mut clear = false;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--clear" => clear = true,
            "--no-grid" => load_result.settings.use_grid = false,
            "--remove-outside" => load_result.settings.remove_outside_volume = true,
            "--terrain-grid" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage(&args[0]));
                load_result.settings.terrain_grid = parse_vec2i(value).unwrap_or_else(|e| fail(e.to_string()));
                load_result.settings.use_terrains = true;
            }
            "--extent" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage(&args[0]));
                load_result.settings.bounds_extent = parse_float(value).unwrap_or_else(|e| fail(e.to_string()));
            }
            other => {
                eprintln!("unknown option: {}", other);
                usage(&args[0]);
            }
        }
        i += 1;
    }

    let mut builder = load_result.builder().unwrap_or_else(|e| fail(e.to_string()));
    let mut scene = load_result.scene;
    if clear {
        builder.clear(&mut scene).unwrap_or_else(|e| fail(e.to_string()));
    } else {
        let report = builder.build(&mut scene).unwrap_or_else(|e| fail(e.to_string()));
        log::info!("{}", report);
    }

    let positions = match scene.light_probe_group(builder.anchor()) {
        Some(group) => group.probe_positions().to_vec(),
        None => fail(format!("object {} has no light probe group", builder.anchor())),
    };
    if let Err(e) = write_probes_to_file(output_path, &positions) {
        fail(format!("failed to write {}: {}", output_path, e));
    }
    log::info!("Wrote {} probes to {}.", positions.len(), output_path);
}
