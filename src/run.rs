#[allow(unused_imports)]
use log::{debug, info};

use std::io::{BufRead, Write};
use std::path::PathBuf;

pub use crate::config::Overwrite;
use crate::err;
use crate::error::{RawError, Result};
use crate::key::ResolvedKey;
use crate::record::{Macro, Macros, Modifiers};
use crate::xml::write_macros;

/// Everything needed to turn one input file into one macro file.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub name: String,
    pub key: String,
    pub modifiers: Modifiers,
    pub overwrite: Overwrite,
}

impl Conversion {
    /// Fail before any work is done when the key is unusable, the input is missing or
    /// the output names a directory.
    pub fn check(&self) -> Result<()> {
        ResolvedKey::resolve(&self.key).require(&self.key)?;
        if !self.input.is_file() {
            return Err(RawError::MissingInput(self.input.clone()).into());
        }
        if self.output.is_dir() {
            return Err(err!(
                "Output path '{}' is a directory",
                self.output.display()
            )
            .into());
        }
        return Ok(());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// the output file existed and was left untouched
    Declined,
}

/// Ask whether an existing output file may be replaced, repeating the question until
/// the answer is one of `y`, `ye`, `yes`, `n` or `no` (in any case). Running out of
/// input counts as a refusal.
pub fn confirm_overwrite(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    let mut answer = String::new();
    loop {
        writeln!(output, "Output file already exists...")?;
        write!(output, "Do you want to overwrite its content? [y/n] ")?;
        output.flush()?;

        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        match answer.trim_end_matches(['\r', '\n']).to_lowercase().as_str() {
            "y" | "ye" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Invalid option")?,
        }
    }
}

fn write_document(
    conversion: &Conversion,
    macros: &Macros,
    output: &mut impl Write,
) -> Result<()> {
    write!(output, "Writing to output file... ")?;
    output.flush()?;
    write_macros(&conversion.output, macros)?;
    writeln!(output, " Done")?;
    return Ok(());
}

/// Convert `conversion.input` into a macro and write it to `conversion.output`,
/// printing progress to `output` and reading any overwrite confirmation from `input`.
///
/// The output file is only touched once the whole macro has been built.
pub fn run(
    conversion: &Conversion,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Outcome> {
    debug!("running conversion {:?}", conversion);
    conversion.check()?;
    writeln!(output, "Converting input file to a macro...")?;
    let record = Macro::from_file(
        &conversion.input,
        conversion.name.clone(),
        conversion.modifiers,
        &conversion.key,
    )?;

    writeln!(output, "Preparing macros element...")?;
    let macros = Macros::from(record);

    if conversion.output.is_file() {
        let overwrite = match conversion.overwrite {
            Overwrite::Always => true,
            Overwrite::Never => false,
            Overwrite::Ask => confirm_overwrite(input, output)?,
        };
        if !overwrite {
            info!("leaving '{}' untouched", conversion.output.display());
            writeln!(output, "Ending script.")?;
            return Ok(Outcome::Declined);
        }
    }

    write_document(conversion, &macros, output)?;
    return Ok(Outcome::Written);
}
