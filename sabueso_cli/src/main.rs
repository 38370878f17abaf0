use sabueso_core::audit;
use sabueso_core::report::LogSink;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "scene" => scene_command(&args, &cwd),
        "scenes" => scenes_command(&args, &cwd),
        "assets" => assets_command(&args, &cwd),
        _ => {
            print_usage();
            Err(format!("unknown command `{command}`"))
        }
    };

    match result {
        Ok(0) => log::info!(target: "sabueso", "no missing references found"),
        Ok(count) => {
            eprintln!("{count} finding(s)");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  sabueso scene  [--path <project_dir>] [--scene <res_path>]");
    eprintln!("  sabueso scenes [--path <project_dir>]   # every enabled scene in project.toml");
    eprintln!("  sabueso assets [--path <project_dir>]   # every scene document under res/");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn project_root(args: &[String], cwd: &Path) -> PathBuf {
    match parse_flag_value(args, "--path") {
        Some(p) => {
            let p = PathBuf::from(p);
            if p.is_absolute() { p } else { cwd.join(p) }
        }
        None => cwd.to_path_buf(),
    }
}

fn scene_command(args: &[String], cwd: &Path) -> Result<usize, String> {
    let root = project_root(args, cwd);
    let scene = parse_flag_value(args, "--scene");
    let mut sink = LogSink;

    audit::scan_scene(&root, scene.as_deref(), &mut sink)
        .map_err(|err| format!("scene scan failed for {}: {err}", root.display()))
}

fn scenes_command(args: &[String], cwd: &Path) -> Result<usize, String> {
    let root = project_root(args, cwd);
    let mut sink = LogSink;

    audit::scan_all_scenes(&root, &mut sink)
        .map_err(|err| format!("scene scan failed for {}: {err}", root.display()))
}

fn assets_command(args: &[String], cwd: &Path) -> Result<usize, String> {
    let root = project_root(args, cwd);
    let mut sink = LogSink;

    audit::scan_assets(&root, &mut sink)
        .map_err(|err| format!("asset scan failed for {}: {err}", root.display()))
}
