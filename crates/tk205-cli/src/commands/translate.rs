use crate::support::{exit_with_load_error, print_json};
use serde_json::json;
use tk205_io::{FileFormat, document_digest, read_document};

pub fn run(input: String, output: String, json_output: bool) {
    let input_format = FileFormat::from_path(&input).unwrap_or_else(|e| exit_with_load_error(e));
    let output_format = FileFormat::from_path(&output).unwrap_or_else(|e| exit_with_load_error(e));
    tk205_io::translate(&input, &output).unwrap_or_else(|e| exit_with_load_error(e));
    let digest = read_document(&output)
        .map(|document| document_digest(&document))
        .unwrap_or_else(|e| exit_with_load_error(e));

    if json_output {
        print_json(&json!({
            "input": input,
            "input_format": input_format.extension(),
            "output": output,
            "output_format": output_format.extension(),
            "digest": digest,
        }));
    } else {
        println!("tk205 translate {input} -> {output}");
        println!("  Formats: {input_format} -> {output_format}");
        println!("  Digest: {digest}");
    }
}
