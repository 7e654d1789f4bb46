use mazewalk::{app::App, generators::Generator, logging, solvers::Solver};

fn main() -> std::io::Result<()> {
    logging::init_stderr_logging();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
    let height = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(255);
    let width = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(height);

    let app = App::new(Some(0));
    for generator in [Generator::RecurBacktrack, Generator::Kruskal] {
        for solver in [Solver::Backtrack, Solver::Bfs] {
            let (generation, solving) = app.profile(height, width, generator, solver, num_iters)?;
            println!(
                "{:<24} {:<28} generation {:>10.2?}  solving {:>10.2?}",
                generator.to_string(),
                solver.to_string(),
                generation,
                solving
            );
        }
    }
    Ok(())
}
