use super::*;
use serde_json::json;

fn temp_root(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("devloop_test_{}_{}", label, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_registry_all_toolset() {
    let registry = ToolRegistry::for_toolset(Toolset::All, PathBuf::from(".")).unwrap();
    assert_eq!(registry.len(), 5);
    assert!(!registry.is_empty());
    assert_eq!(registry.names(), ToolName::ALL.to_vec());
}

#[tokio::test]
async fn test_registry_partial_toolsets() {
    let dev = ToolRegistry::for_toolset(Toolset::Dev, PathBuf::from(".")).unwrap();
    assert_eq!(dev.len(), 4);
    assert!(dev.lookup("getWeatherDetails").is_err());

    let weather = ToolRegistry::for_toolset(Toolset::Weather, PathBuf::from(".")).unwrap();
    assert_eq!(weather.names(), vec![ToolName::GetWeatherDetails]);
    assert!(weather.lookup("readFile").is_err());
}

#[tokio::test]
async fn test_register_twice_rejected() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(weather::WeatherTool)).unwrap();
    assert!(registry.register(Box::new(weather::WeatherTool)).is_err());
}

#[test]
fn test_tool_name_round_trip() {
    for name in ToolName::ALL {
        assert_eq!(name.as_str().parse::<ToolName>().unwrap(), name);
    }
    assert_eq!(
        "deleteEverything".parse::<ToolName>(),
        Err(UnknownTool {
            name: "deleteEverything".into()
        })
    );
    // Wire names are case-sensitive.
    assert!("readfile".parse::<ToolName>().is_err());
}

#[test]
fn test_catalogue_lists_every_signature() {
    let registry = ToolRegistry::for_toolset(Toolset::All, PathBuf::from(".")).unwrap();
    let catalogue = registry.catalogue();
    assert_eq!(catalogue.lines().count(), 5);
    assert!(catalogue.contains("- function readFile(path: Str): Str"));
    assert!(catalogue.contains("- function writeFile({ path: Str, content: Str }): Str"));
    assert!(catalogue.contains("- function getWeatherDetails(city: Str): Str"));
}

#[tokio::test]
async fn test_unknown_tool() {
    let registry = ToolRegistry::for_toolset(Toolset::All, PathBuf::from(".")).unwrap();
    let result = registry.invoke("nonexistent_tool", json!({})).await;
    assert_eq!(
        result,
        Err(UnknownTool {
            name: "nonexistent_tool".into()
        })
    );
}

#[tokio::test]
async fn test_weather_variants_identical() {
    let registry = ToolRegistry::for_toolset(Toolset::Weather, PathBuf::from(".")).unwrap();
    let upper = registry.invoke("getWeatherDetails", json!("DUBAI")).await.unwrap();
    let lower = registry.invoke("getWeatherDetails", json!("dubai")).await.unwrap();
    let title = registry.invoke("getWeatherDetails", json!("Dubai")).await.unwrap();
    assert_eq!(upper, lower);
    assert_eq!(lower, title);

    let unknown = registry.invoke("getWeatherDetails", json!("Atlantis")).await.unwrap();
    assert_eq!(unknown, "0°");

    let named = registry
        .invoke("getWeatherDetails", json!({"city": "New York"}))
        .await
        .unwrap();
    assert_eq!(named, "20°");
}

#[tokio::test]
async fn test_bad_input_becomes_error_string() {
    let registry = ToolRegistry::for_toolset(Toolset::All, PathBuf::from(".")).unwrap();
    let result = registry.invoke("readFile", json!(42)).await.unwrap();
    assert!(result.starts_with("Error: "));

    let result = registry
        .invoke("writeFile", json!({"path": "x.txt"}))
        .await
        .unwrap();
    assert!(result.starts_with("Error: "));
}

#[tokio::test]
async fn test_read_file_cargo_toml() {
    let registry = ToolRegistry::for_toolset(Toolset::Dev, PathBuf::from(".")).unwrap();
    let result = registry.invoke("readFile", json!("Cargo.toml")).await.unwrap();
    assert!(result.contains("[package]"));
}

#[tokio::test]
async fn test_read_file_nonexistent() {
    let registry = ToolRegistry::for_toolset(Toolset::Dev, PathBuf::from(".")).unwrap();
    let result = registry
        .invoke("readFile", json!("nonexistent_file_xyz.txt"))
        .await
        .unwrap();
    assert!(result.starts_with("Error reading file:"));
}

#[tokio::test]
async fn test_write_then_read_round_trip() {
    let dir = temp_root("roundtrip");
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();

    let content = "line one\nline two with ünïcode\n";
    let result = registry
        .invoke("writeFile", json!({"path": "notes.txt", "content": content}))
        .await
        .unwrap();
    assert_eq!(result, "✅ File written successfully to notes.txt");

    let read = registry.invoke("readFile", json!("notes.txt")).await.unwrap();
    assert_eq!(read, content);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_write_file_creates_parents() {
    let dir = temp_root("parents");
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();
    registry
        .invoke(
            "writeFile",
            json!({"path": "a/b/c/deep.txt", "content": "nested"}),
        )
        .await
        .unwrap();

    let written = std::fs::read_to_string(dir.join("a/b/c/deep.txt")).unwrap();
    assert_eq!(written, "nested");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_append_file_creates_then_appends() {
    let dir = temp_root("append");
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();

    let first = registry
        .invoke("appendFile", json!({"path": "log.txt", "content": "a"}))
        .await
        .unwrap();
    assert_eq!(first, "✅ Content appended successfully to log.txt");
    registry
        .invoke("appendFile", json!({"path": "log.txt", "content": "b"}))
        .await
        .unwrap();

    let written = std::fs::read_to_string(dir.join("log.txt")).unwrap();
    assert_eq!(written, "ab");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_append_file_missing_dir_reports_error() {
    let dir = temp_root("append_missing");
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();
    let result = registry
        .invoke(
            "appendFile",
            json!({"path": "no/such/dir/log.txt", "content": "a"}),
        )
        .await
        .unwrap();
    assert!(result.starts_with("Error appending to file:"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_execute_command_success() {
    let dir = temp_root("exec");
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();
    let result = registry
        .invoke("executeCommand", json!("echo hello; echo oops 1>&2"))
        .await
        .unwrap();
    assert_eq!(result, "📤 STDOUT:\nhello\n\n📥 STDERR:\noops\n");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_execute_command_runs_in_root() {
    let dir = temp_root("exec_root");
    std::fs::write(dir.join("marker.txt"), "x").unwrap();
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();
    let result = registry
        .invoke("executeCommand", json!({"command": "ls"}))
        .await
        .unwrap();
    assert!(result.contains("marker.txt"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_execute_command_failure_is_a_string() {
    let registry = ToolRegistry::for_toolset(Toolset::Dev, PathBuf::from(".")).unwrap();
    let result = registry
        .invoke("executeCommand", json!("exit 3"))
        .await
        .unwrap();
    assert!(result.starts_with("❌ Command error:"));
    assert!(result.contains("exit code 3"));
}

#[test]
fn test_cap_output_short_untouched() {
    assert_eq!(cap_output("hello"), "hello");
}

#[test]
fn test_cap_output_truncates_on_char_boundary() {
    let long = "é".repeat(TOOL_MAX_OUTPUT_SIZE);
    let capped = cap_output(&long);
    assert!(capped.ends_with(&format!(
        "output truncated at {} bytes",
        TOOL_MAX_OUTPUT_SIZE
    )));
    assert!(capped.len() < long.len());
}

#[tokio::test]
async fn test_read_file_large_file_is_capped() {
    let dir = temp_root("read_large");
    std::fs::write(dir.join("big.txt"), "x".repeat(TOOL_MAX_OUTPUT_SIZE * 2)).unwrap();
    let registry = ToolRegistry::for_toolset(Toolset::Dev, dir.clone()).unwrap();

    let result = registry.invoke("readFile", json!("big.txt")).await.unwrap();
    assert!(result.len() < TOOL_MAX_OUTPUT_SIZE * 2);
    assert!(result.starts_with(&"x".repeat(TOOL_MAX_OUTPUT_SIZE)));
    assert!(result.ends_with(&format!(
        "output truncated at {} bytes",
        TOOL_MAX_OUTPUT_SIZE
    )));

    std::fs::remove_dir_all(&dir).unwrap();
}
