use rand::rngs::SmallRng;
use rand::SeedableRng;

use seqcolor::coloring::{ColorClasses, IsetColoring};
use seqcolor::graph::Graph;
use seqcolor::validate::verify_coloring;

#[derive(Clone, Copy, PartialEq, Eq)]
enum EngineChoice {
    Classes,
    Iset,
    Both,
}

fn main() {
    let mut engine = EngineChoice::Both;
    let mut max_colors: Option<usize> = None;
    let mut random: Option<(usize, f64)> = None;
    let mut seed: Option<u64> = None;
    let mut file: Option<String> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--engine" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                engine = match v.as_str() {
                    "classes" => EngineChoice::Classes,
                    "iset" => EngineChoice::Iset,
                    "both" => EngineChoice::Both,
                    _ => usage_and_exit(2),
                };
                i += 2;
            }
            "--max-colors" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                max_colors = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--random" => {
                let n = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let p = args.get(i + 2).unwrap_or_else(|| usage_and_exit(2));
                random = Some((
                    n.parse().unwrap_or_else(|_| usage_and_exit(2)),
                    p.parse().unwrap_or_else(|_| usage_and_exit(2)),
                ));
                i += 3;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            arg if !arg.starts_with('-') && file.is_none() => {
                file = Some(arg.to_string());
                i += 1;
            }
            _ => usage_and_exit(2),
        }
    }

    let graph = match (&file, random) {
        (Some(path), None) => match Graph::load_from_file(path) {
            Ok(g) => {
                println!("Loaded {path}: n={} m={}", g.order(), g.num_edges());
                g
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                std::process::exit(1);
            }
        },
        (None, Some((n, p))) => {
            if !(0.0..=1.0).contains(&p) {
                eprintln!("--random: edge probability {p} outside [0, 1]");
                std::process::exit(2);
            }
            let seed = seed.unwrap_or_else(|| rand::random());
            let mut rng = SmallRng::seed_from_u64(seed);
            let g = Graph::new_random(&mut rng, n, p);
            println!("Sampled G({n}, {p}) with seed {seed}: m={}", g.num_edges());
            g
        }
        _ => usage_and_exit(2),
    };

    if graph.order() == 0 {
        eprintln!("graph has no vertices; nothing to color");
        std::process::exit(1);
    }

    let budget = max_colors.unwrap_or_else(|| graph.order());
    if budget == 0 || budget > graph.order() {
        eprintln!(
            "--max-colors must be in 1..={} for this graph, got {budget}",
            graph.order()
        );
        std::process::exit(2);
    }

    if engine != EngineChoice::Iset {
        let mut classes = ColorClasses::new(&graph, budget);
        let num = classes.color_graph();
        report("color-classes", &graph, classes.colors(), num);
    }
    if engine != EngineChoice::Classes {
        let mut iset = IsetColoring::new(&graph);
        let num = iset.color_graph();
        report("independent-set", &graph, iset.colors(), num);
    }
}

fn report(name: &str, graph: &Graph, colors: &[usize], num_colors: usize) {
    if let Err(e) = verify_coloring(graph, colors, None) {
        eprintln!("{name}: INVALID coloring: {e}");
        std::process::exit(1);
    }
    let mut class_sizes = vec![0usize; num_colors + 1];
    for &c in colors {
        class_sizes[c] += 1;
    }
    println!(
        "{name}: {num_colors} colors, class sizes {:?}",
        &class_sizes[1..]
    );
    if colors.len() <= 32 {
        for (v, &c) in colors.iter().enumerate() {
            println!("  vertex {v:>2} -> color {c}");
        }
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  seqcolor [--engine classes|iset|both] [--max-colors K] FILE\n  seqcolor [--engine classes|iset|both] [--max-colors K] --random N P [--seed SEED]\n\nOptions:\n  --engine classes|iset|both  Coloring engine to run (default: both)\n  --max-colors K              Color budget for the class engine (default: graph order)\n  --random N P                Sample a G(N, P) random graph instead of reading FILE\n  --seed SEED                 Deterministic seed for --random\n\nFILE is a text adjacency matrix: one row of 0/1 characters per line,\nsquare, symmetric, zero diagonal.\n"
    );
    std::process::exit(code)
}
