//! Ask for a file name, make sure the file is in `dump/`, print it, then
//! ask for a date.
//!
//! ```text
//! cargo run -p filedrop --example dump
//! ```

use std::error::Error;
use std::io::Read;

use chrono::{DateTime, FixedOffset};
use filedrop::{Session, SessionConfig, logging};

fn main() -> Result<(), Box<dyn Error>> {
    if let Err(e) = logging::init() {
        eprintln!("logging disabled: {e}");
    }

    let session = Session::new(SessionConfig::new().with_root("dump"));

    let name: String = session.var("file name")?;
    let mut content = String::new();
    session.resolve(&name)?.read_to_string(&mut content)?;
    println!("{content}");

    let date: DateTime<FixedOffset> = session.var("Date")?;
    println!("{date}");

    session.alert("Press enter to continue")?;
    Ok(())
}
