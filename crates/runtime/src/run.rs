use core::Context;
use deno_core::{JsRuntime, ModuleCodeString, PollEventLoopOptions, RuntimeOptions};

use crate::env::init_env;
use crate::extensions::extensions;

// Scripts expect a console; the runtime ships no web APIs beyond it.
const BOOTSTRAP: &str = r#"
    if (typeof globalThis.console === 'undefined') {
        globalThis.console = {
            log(...args) { Deno.core.print(args.join(' ') + '\n'); },
            error(...args) { Deno.core.print('[ERROR] ' + args.join(' ') + '\n', true); },
            warn(...args) { Deno.core.print('[WARN] ' + args.join(' ') + '\n', true); },
            info(...args) { Deno.core.print('[INFO] ' + args.join(' ') + '\n'); },
            debug(...args) { Deno.core.print('[DEBUG] ' + args.join(' ') + '\n'); },
        };
    }
"#;

pub fn run(context: &Context) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to start tokio runtime");

    if let Err(err) = rt.block_on(run_async(context)) {
        stdio::error("run", &err);
        std::process::exit(1);
    }
}

async fn run_async(context: &Context) -> Result<(), String> {
    init_env();

    let script = context
        .script
        .as_ref()
        .ok_or_else(|| "no script given; usage: luna run <script.js>".to_string())?;

    let source = std::fs::read_to_string(&script.resolved.path).map_err(|err| {
        format!(
            "failed to read script {}: {}",
            script.resolved.path.display(),
            err
        )
    })?;

    stdio::debug(
        "run",
        &format!("running {}", script.resolved.path.display()),
    );

    let mut runtime = JsRuntime::new(RuntimeOptions {
        extensions: extensions(),
        ..Default::default()
    });

    runtime
        .execute_script("bootstrap.js", ModuleCodeString::from(BOOTSTRAP.to_string()))
        .map_err(|err| err.to_string())?;

    runtime
        .execute_script("main.js", ModuleCodeString::from(source))
        .map_err(|err| err.to_string())?;

    runtime
        .run_event_loop(PollEventLoopOptions::default())
        .await
        .map_err(|err| err.to_string())?;

    Ok(())
}
