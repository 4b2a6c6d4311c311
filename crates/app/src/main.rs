//! Entry point for mtl2gl: converts an OBJ/MTL pair into C headers with
//! flat float arrays for OpenGL ES.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use asset::Config;
use emit::OutputNames;

#[derive(Debug, PartialEq)]
struct CliArgs {
    obj_path: PathBuf,
    mtl_path: PathBuf,
    config: Config,
    verbose: bool,
}

const USAGE: &str = "\
usage: mtl2gl --obj=FILE.obj --mtl=FILE.mtl [options]

options:
  --no-move        keep the object where it is (skip centering)
  --no-scale       keep the object size (skip scaling to 1 unit)
  --scale=F        scale by an explicit factor instead of 1/longest-side
  --center=X,Y,Z   translate by -(X,Y,Z) instead of the extent midpoint
  --strict         fail on face corners without texcoord/normal indices
  --flip-v         emit 1-v for texture coordinates
  --verbose        log pipeline statistics
";

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut obj_path: Option<PathBuf> = None;
    let mut mtl_path: Option<PathBuf> = None;
    let mut config = Config::default();
    let mut verbose = false;

    for arg in args {
        if let Some(val) = arg.strip_prefix("--obj=") {
            obj_path = Some(PathBuf::from(val));
        } else if let Some(val) = arg.strip_prefix("--mtl=") {
            mtl_path = Some(PathBuf::from(val));
        } else if arg == "--no-move" {
            config.center = false;
        } else if arg == "--no-scale" {
            config.scale = false;
        } else if let Some(val) = arg.strip_prefix("--scale=") {
            let factor = val
                .parse::<f32>()
                .with_context(|| format!("invalid --scale value '{val}'"))?;
            if factor == 0.0 {
                bail!("--scale must be non-zero");
            }
            config.explicit_scale = Some(factor);
        } else if let Some(val) = arg.strip_prefix("--center=") {
            config.origin = Some(parse_origin(val)?);
        } else if arg == "--strict" {
            config.strict = true;
        } else if arg == "--flip-v" {
            config.flip_v = true;
        } else if arg == "--verbose" {
            verbose = true;
        } else {
            bail!("unknown argument '{arg}'\n\n{USAGE}");
        }
    }

    let Some(obj_path) = obj_path else {
        bail!("missing required --obj=FILE.obj\n\n{USAGE}");
    };
    let Some(mtl_path) = mtl_path else {
        bail!("missing required --mtl=FILE.mtl\n\n{USAGE}");
    };

    Ok(CliArgs {
        obj_path,
        mtl_path,
        config,
        verbose,
    })
}

fn parse_origin(val: &str) -> Result<[f32; 3]> {
    let parts: Vec<&str> = val.split(',').collect();
    if parts.len() != 3 {
        bail!("--center expects X,Y,Z, got '{val}'");
    }
    let mut origin = [0.0f32; 3];
    for (slot, part) in origin.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f32>()
            .with_context(|| format!("invalid --center component '{part}'"))?;
    }
    Ok(origin)
}

fn main() -> Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "--help" || arg == "-h") {
        print!("{USAGE}");
        return Ok(());
    }

    let args = parse_args(std::env::args().skip(1))?;

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Some(factor) = args.config.explicit_scale
        && factor < 0.0
    {
        log::warn!("negative scale factor {factor}: normal orientation is not corrected");
    }

    log::info!(
        "converting {} + {}",
        args.obj_path.display(),
        args.mtl_path.display()
    );

    let obj_contents = std::fs::read_to_string(&args.obj_path)
        .with_context(|| format!("failed to read OBJ file {}", args.obj_path.display()))?;
    let mtl_contents = std::fs::read_to_string(&args.mtl_path)
        .with_context(|| format!("failed to read MTL file {}", args.mtl_path.display()))?;

    let output = asset::convert(&obj_contents, &mtl_contents, &args.config)
        .context("conversion failed")?;

    let names = OutputNames::derive(&args.obj_path, &args.mtl_path);
    emit::write_headers(&output, &names)
        .with_context(|| format!("failed to write output headers for {}", names.obj_prefix))?;

    log::info!(
        "done: {} corners, {} materials",
        output.geometry.corner_count,
        output.materials.material_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_center_and_scale() {
        let parsed = args(&["--obj=cube.obj", "--mtl=cube.mtl"]).expect("parse");
        assert!(parsed.config.center);
        assert!(parsed.config.scale);
        assert_eq!(parsed.config.explicit_scale, None);
        assert!(!parsed.verbose);
    }

    #[test]
    fn no_move_and_no_scale_force_flags_off() {
        let parsed =
            args(&["--obj=a.obj", "--mtl=a.mtl", "--no-move", "--no-scale"]).expect("parse");
        assert!(!parsed.config.center);
        assert!(!parsed.config.scale);
    }

    #[test]
    fn explicit_scale_and_origin() {
        let parsed =
            args(&["--obj=a.obj", "--mtl=a.mtl", "--scale=0.5", "--center=1,2,3"]).expect("parse");
        assert_eq!(parsed.config.explicit_scale, Some(0.5));
        assert_eq!(parsed.config.origin, Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn zero_scale_is_rejected() {
        assert!(args(&["--obj=a.obj", "--mtl=a.mtl", "--scale=0"]).is_err());
    }

    #[test]
    fn negative_scale_is_permitted() {
        let parsed = args(&["--obj=a.obj", "--mtl=a.mtl", "--scale=-1.0"]).expect("parse");
        assert_eq!(parsed.config.explicit_scale, Some(-1.0));
    }

    #[test]
    fn missing_obj_argument_fails() {
        assert!(args(&["--mtl=a.mtl"]).is_err());
    }

    #[test]
    fn unknown_argument_fails() {
        assert!(args(&["--obj=a.obj", "--mtl=a.mtl", "--wat"]).is_err());
    }

    #[test]
    fn malformed_center_fails() {
        assert!(args(&["--obj=a.obj", "--mtl=a.mtl", "--center=1,2"]).is_err());
    }
}
