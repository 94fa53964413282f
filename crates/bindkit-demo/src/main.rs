#![forbid(unsafe_code)]

//! bindkit demo binary entry point.

use bindkit_demo::app::{AppModel, Frame};
use bindkit_demo::cli;
use bindkit_demo::logging;
use bindkit_demo::screens::ScreenId;

fn print_frames(frames: &[Frame], counter: &mut usize) {
    for frame in frames {
        *counter += 1;
        println!("── {} · frame {} ──", frame.screen, counter);
        println!("{}", frame.text);
        println!();
    }
}

fn main() {
    let opts = cli::Opts::parse();
    logging::init(opts.log_format);

    let mut app = AppModel::new();
    if opts.screen != ScreenId::Catalog {
        app.push(opts.screen);
    }

    let mut counter = 0;
    print_frames(&app.take_frames(), &mut counter);

    for action in &opts.presses {
        let result = app.press(action);
        print_frames(&app.take_frames(), &mut counter);
        if let Err(e) = result {
            eprintln!("Action '{action}' failed: {e}");
            std::process::exit(1);
        }
    }
}
