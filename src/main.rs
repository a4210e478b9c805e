use anyhow::{
    bail,
    Context,
    Result
};
use log::LevelFilter;
use regex::Regex;
use std::env;
use v4l2_crop::video_devices::Rect;

const USAGE: &str = "usage: crop-info [-v] <device> [--set LEFT,TOP,WIDTHxHEIGHT]";

struct Args {
    verbose: bool,
    device: String,
    set: Option<Rect>
}

fn main() -> Result<()> { // Note, this is anyhow::Result
    let args = parse_args(env::args().skip(1))?;
    init_logging(args.verbose)?;
    run(&args)
}

#[cfg(target_os = "linux")]
fn run(args: &Args) -> Result<()> {
    use nix::errno::Errno;
    use v4l2_crop::video_devices::{
        device_name,
        get_crop_capability,
        get_crop_rect,
        is_capture_device,
        query_capability,
        set_crop_rect,
        VideoDevice
    };

    let device = VideoDevice::open(&args.device)
        .with_context(|| format!("opening {}", args.device))?;

    let capability = query_capability(&device)?;
    println!("device: {} ({})", device_name(&capability), device.path().display());
    if !is_capture_device(&capability) {
        bail!("{} is not a video capture device", args.device);
    }

    match get_crop_capability(&device) {
        Ok(cap) => println!("crop: {}", cap),
        Err(err) if matches!(err.errno(), Some(Errno::ENODATA) | Some(Errno::ENOTTY)) => {
            log::warn!("{}", err);
            bail!("{} does not support cropping", args.device);
        },
        Err(err) => { return Err(err.into()); }
    };

    if let Some(rect) = args.set {
        set_crop_rect(&device, rect)?;
        // Drivers adjust the request silently, so show what stuck.
        let applied = get_crop_rect(&device)?;
        if applied != rect {
            log::info!("driver adjusted crop from {} to {}", rect, applied);
        }
        println!("active: {}", applied);
    }
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_args: &Args) -> Result<()> {
    bail!("crop-info needs Video4Linux2, which is only available on Linux")
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args> {
    let mut verbose = false;
    let mut device = None;
    let mut set = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--set" => {
                let value = args.next().context(USAGE)?;
                set = Some(parse_rect(&value)?);
            },
            _ if arg.starts_with('-') => bail!("unknown option {}\n{}", arg, USAGE),
            _ if device.is_none() => device = Some(arg),
            _ => bail!("unexpected argument {}\n{}", arg, USAGE)
        }
    }

    let device = device.context(USAGE)?;
    Ok(Args { verbose, device, set })
}

fn parse_rect(value: &str) -> Result<Rect> {
    let re = Regex::new(r"^(-?\d+),(-?\d+),(\d+)x(\d+)$")?;
    let Some(caps) = re.captures(value) else {
        bail!("crop rectangle must look like LEFT,TOP,WIDTHxHEIGHT, got {:?}", value);
    };
    Ok(Rect {
        left: caps[1].parse().with_context(|| format!("left offset in {:?}", value))?,
        top: caps[2].parse().with_context(|| format!("top offset in {:?}", value))?,
        width: caps[3].parse().with_context(|| format!("width in {:?}", value))?,
        height: caps[4].parse().with_context(|| format!("height in {:?}", value))?
    })
}
