use byteframes::ByteframesConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    database_path: String,
}

pub fn run(config: &ByteframesConfig, json: bool, pretty: bool) {
    let info = ConfigInfo {
        config_file: ByteframesConfig::config_file_path(),
        data_dir: config.data_dir.clone(),
        database_path: config.database_path(),
    };

    if json || pretty {
        let serialized = if pretty {
            serde_json::to_string_pretty(&info)
        } else {
            serde_json::to_string(&info)
        };
        match serialized {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Error serializing config info: {}", e),
        }
        return;
    }

    println!("Byteframes Configuration");
    println!("========================\n");
    println!("{}", config.summary());
}
