use light_probe_builder::io::probe_io::read_probes_from_file;
use light_probe_builder::math::aabb::AABB;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <probes.txt>", args[0]);
        std::process::exit(1);
    }

    let positions = read_probes_from_file(&args[1])
        .unwrap_or_else(|e| panic!("failed to read {}: {}", args[1], e));

    println!("Probes: {}", positions.len());
    if positions.is_empty() {
        return;
    }

    let mut bounds = AABB::default();
    for p in &positions {
        bounds.expand_by_point(p);
    }
    let center = bounds.center();
    let size = bounds.size();
    println!("Min: {:.6}, {:.6}, {:.6}", bounds.p_min.x, bounds.p_min.y, bounds.p_min.z);
    println!("Max: {:.6}, {:.6}, {:.6}", bounds.p_max.x, bounds.p_max.y, bounds.p_max.z);
    println!("Center: {:.6}, {:.6}, {:.6}", center.x, center.y, center.z);
    println!("Size: {:.6}, {:.6}, {:.6}", size.x, size.y, size.z);
}
