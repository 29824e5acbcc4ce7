use scaf_core::responses::GenerationReport;
use scaf_core::schema::SchemaDescriptor;
use scaf_sink::{FsSink, PreviewSink, Sink};
use scaf_synth::{GenerateOptions, Generator};

use crate::cli::root_commands::GenerateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::descriptor;
use crate::output::output;

/// Handle `scaf generate`.
pub fn handle(args: &GenerateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let descriptor = descriptor::load(&args.descriptor)?;
    let options = GenerateOptions::now().with_dry_run(args.dry_run);

    let mut fs = FsSink::new(&ctx.project_root);
    let report = if args.dry_run {
        let mut preview = PreviewSink::new(&fs);
        let report = run(&mut preview, ctx, &descriptor, &options)?;
        tracing::info!(writes = preview.captured().len(), "dry run, nothing written");
        report
    } else {
        run(&mut fs, ctx, &descriptor, &options)?
    };

    match flags.format {
        OutputFormat::Table => output(&report.artifacts, flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

fn run<S: Sink>(
    sink: &mut S,
    ctx: &AppContext,
    descriptor: &SchemaDescriptor,
    options: &GenerateOptions,
) -> anyhow::Result<GenerationReport> {
    Ok(Generator::new(sink, &ctx.config).generate(descriptor, options)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use scaf_config::ScafConfig;

    use super::handle;
    use crate::cli::root_commands::GenerateArgs;
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    fn setup() -> (tempfile::TempDir, AppContext, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let descriptor = dir.path().join("post.json");
        std::fs::write(
            &descriptor,
            r#"{ "entity_name": "Post", "attributes": [{ "name": "title" }] }"#,
        )
        .expect("write descriptor");
        let ctx = AppContext::new(dir.path().to_path_buf(), ScafConfig::default());
        (dir, ctx, descriptor)
    }

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            project: None,
        }
    }

    #[test]
    fn writes_artifacts_under_project_root() {
        let (dir, ctx, descriptor) = setup();
        let args = GenerateArgs {
            descriptor,
            dry_run: false,
        };

        handle(&args, &ctx, &flags()).expect("generate should succeed");

        assert!(dir.path().join("app/Models/Post.php").is_file());
        assert!(dir.path().join("resources/views/posts/edit.blade.php").is_file());
        let routes = std::fs::read_to_string(dir.path().join("routes/web.php")).expect("routes");
        assert!(routes.contains("Route::resource('posts'"));
    }

    #[test]
    fn dry_run_leaves_project_untouched() {
        let (dir, ctx, descriptor) = setup();
        let args = GenerateArgs {
            descriptor,
            dry_run: true,
        };

        handle(&args, &ctx, &flags()).expect("dry run should succeed");

        assert!(!dir.path().join("app").exists());
        assert!(!dir.path().join("routes").exists());
    }
}
