use anyhow::{Ok, Result};
use regex::Regex;
use std::fs;
use substreams_ethereum::Abigen;

fn main() -> Result<(), anyhow::Error> {
    let file_names = ["abi/UnifarmV18.json"];
    let file_output_names = ["src/abi/unifarm_v18.rs"];

    let regex = Regex::new(r#"("\w+"\s?:\s?")_(\w+")"#)?;
    for (i, f) in file_names.into_iter().enumerate() {
        println!("cargo:rerun-if-changed={f}");
        let contents = fs::read_to_string(f)?;

        // sanitize fields and attributes starting with an underscore
        let sanitized_abi_file = regex.replace_all(contents.as_str(), "${1}u_${2}");

        Abigen::from_bytes("UnifarmV18", sanitized_abi_file.as_bytes())?
            .generate()?
            .write_to_file(file_output_names[i])?;
    }

    Ok(())
}
