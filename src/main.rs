use std::io;
use std::sync::Arc;

use tracing::Level;

use descent::prelude::*;

/// Directory trace files are written into, relative to the working directory.
const TRACE_DIR: &str = "output";
const MAX_ITERATIONS: usize = 1000;

fn main() -> io::Result<()> {
    let sphere = Sphere::new(5.0, 2.0, 2.0).expect("the built-in constraint is well-formed");
    let tracer = Arc::new(Tracer::new(Level::DEBUG));
    let writer = TraceWriter::new(TRACE_DIR);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());

    session.banner()?;
    loop {
        let Some(request) = session.read_request()? else {
            break;
        };

        let method = GradientProjection::<f64>::NAME;
        match solve(sphere, &request, &tracer) {
            Ok(solution) => {
                session.report_best(method, &solution)?;
                match writer.write(method, &solution) {
                    Ok(path) => session.trace_written(&path)?,
                    Err(err) => session.trace_failed(&err)?,
                }
            }
            Err(err) => session.solver_failed(method, &err)?,
        }

        if !session.should_continue()? {
            break;
        }
    }

    Ok(())
}

/// One request, one synchronous solver run.
fn solve(
    sphere: Sphere<f64>,
    request: &SolverRequest,
    tracer: &Arc<Tracer>,
) -> Result<Solution<f64>, SolverError> {
    GradientProjection::new(request.x1, request.x2)
        .build_for(ConstrainedObjective::new(Quadratic, sphere))
        .configure(|state| state.tolerance(request.accuracy).max_iters(MAX_ITERATIONS))
        .with_watcher(tracer.clone(), Frequency::Always)
        .build()
        .run()
}
