// build.rs - TOML-driven compile-time limits for the lexer engine
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    engine: EngineLimits,
    source: SourceLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct EngineLimits {
    max_stack_depth: usize,
    max_zero_width_steps: usize,
    max_delegation_depth: usize,
    max_states_per_table: usize,
}

#[derive(serde::Deserialize)]
struct SourceLimits {
    max_file_size: u64,
    large_file_threshold: u64,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    always_reported_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=WEBLEX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=WEBLEX_CONFIG_DIR");

    let profile = env::var("WEBLEX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("WEBLEX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of weblex_engine
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);

    println!(
        "cargo:warning=Generated constants from {}",
        config_path.display()
    );
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_STACK_DEPTH: usize = 65_536;
    const ABSOLUTE_MAX_DELEGATION_DEPTH: usize = 1_024;

    if config.source.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.source.large_file_threshold > config.source.max_file_size {
        panic!("LIMITS: large_file_threshold exceeds max_file_size");
    }

    if config.engine.max_stack_depth < 2 || config.engine.max_stack_depth > ABSOLUTE_MAX_STACK_DEPTH
    {
        panic!("LIMITS: max_stack_depth must be between 2 and {}", ABSOLUTE_MAX_STACK_DEPTH);
    }

    if config.engine.max_zero_width_steps == 0 {
        panic!("LIMITS: max_zero_width_steps must be at least 1");
    }

    if config.engine.max_delegation_depth == 0
        || config.engine.max_delegation_depth > ABSOLUTE_MAX_DELEGATION_DEPTH
    {
        panic!(
            "LIMITS: max_delegation_depth must be between 1 and {}",
            ABSOLUTE_MAX_DELEGATION_DEPTH
        );
    }

    if config.engine.max_states_per_table == 0 {
        panic!("LIMITS: max_states_per_table must be at least 1");
    }

    if config.logging.always_reported_level > 2 {
        panic!("LIMITS: always_reported_level too high (max: 2)");
    }

    if profile == "production" {
        if config.source.max_file_size > 50_000_000 {
            panic!("PRODUCTION: max_file_size too high for production");
        }
        if config.engine.max_stack_depth > 4_096 {
            panic!("PRODUCTION: max_stack_depth too high for production");
        }
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod engine {{
        pub const MAX_STACK_DEPTH: usize = {};
        pub const MAX_ZERO_WIDTH_STEPS: usize = {};
        pub const MAX_DELEGATION_DEPTH: usize = {};
        pub const MAX_STATES_PER_TABLE: usize = {};
    }}

    pub mod source {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const ALWAYS_REPORTED_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Engine
        config.engine.max_stack_depth,
        config.engine.max_zero_width_steps,
        config.engine.max_delegation_depth,
        config.engine.max_states_per_table,
        // Source
        config.source.max_file_size,
        config.source.large_file_threshold,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.always_reported_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
