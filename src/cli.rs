use environment_config::{Builder, FieldOptions, types};

fn main() {
    dotenvy::from_filename("./test.env").ok();
    match std::env::args().nth(1) {
        Some(arg) => match arg.as_str() {
            "default" => load_demo_config(),
            "error" => load_broken_config(),
            "ensure" => ensure_demo_config(),
            "docs" => generate_docs(),
            _ => println!("unknown arg: {}. Available: default, error, ensure, docs", arg),
        },
        None => {
            println!("Usage: envconfig-cli [command]");
            println!("Commands:");
            println!("  default  - Load the demo schema and print its values");
            println!("  error    - Load a schema with missing/invalid keys");
            println!("  ensure   - Validate the demo schema without keeping a config");
            println!("  docs     - Generate CONFIG.md documentation");
        }
    };
}

fn declare_demo(env: &mut Builder) {
    env.integer(
        "TEST_INT",
        FieldOptions::required_value().doc("An integer value"),
    );
    env.string(
        "TEST_STRING",
        FieldOptions::required_value().doc("A string value"),
    );
    env.boolean(
        "TEST_BOOL_TRUE",
        FieldOptions::with_default(false).doc("A boolean flag"),
    );
    env.json(
        "TEST_FLAGS",
        FieldOptions::with_default("{}").doc("Structural feature flags"),
    );
}

fn declare_broken(env: &mut Builder) {
    env.integer("MISSING_INT", FieldOptions::required_value());
    env.integer("TEST_STRING", FieldOptions::required_value());
    env.declare("TEST_INT", "no_such_type", FieldOptions::new());
    env.declare(
        "TEST_BOOL_TRUE",
        types::BOOLEAN,
        FieldOptions::required_value().default(true),
    );
}

fn load_demo_config() {
    match environment_config::load(declare_demo) {
        Ok(config) => {
            println!("Config loaded successfully!");
            for key in config.keys() {
                println!("  {} = {}", key, config.get(key).unwrap());
            }
        }
        Err(errors) => eprintln!("{}", errors),
    }
}

fn load_broken_config() {
    match environment_config::load(declare_broken) {
        Ok(_) => println!("you should not see this"),
        Err(errors) => eprintln!("{}", errors),
    }
}

fn ensure_demo_config() {
    match environment_config::ensure(declare_demo) {
        Ok(()) => println!("Environment is valid."),
        Err(errors) => eprintln!("{}", errors),
    }
}

fn generate_docs() {
    let mut builder = Builder::new();
    declare_demo(&mut builder);
    match builder.write_docs("CONFIG.md") {
        Ok(_) => println!("Documentation written to CONFIG.md"),
        Err(e) => eprintln!("Failed to write documentation: {}", e),
    }
}
