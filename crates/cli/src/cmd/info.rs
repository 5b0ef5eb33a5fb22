use reduce_lib::consts::{APP_NAME, CONFIG_EXTENSIONS, DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV};

use crate::output::{OutputFormat, print_stat};

pub fn cmd_info(format: OutputFormat) {
  let version = env!("CARGO_PKG_VERSION");

  if format.is_json() {
    let info = serde_json::json!({
      "version": version,
      "config_formats": CONFIG_EXTENSIONS,
      "default_config": DEFAULT_CONFIG_FILE,
      "default_output_dir": DEFAULT_OUTPUT_DIR,
      "output_dir_env": OUTPUT_DIR_ENV,
    });
    println!("{}", info);
    return;
  }

  println!("{} {}", APP_NAME, version);
  print_stat("Config formats", &CONFIG_EXTENSIONS.join(", "));
  print_stat("Default config", DEFAULT_CONFIG_FILE);
  print_stat("Default output", DEFAULT_OUTPUT_DIR);
  print_stat("Output override", OUTPUT_DIR_ENV);
}
