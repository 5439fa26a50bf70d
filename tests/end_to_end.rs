//! End-to-end scenarios against `AnalysisEngine`, one per documented
//! checker interaction: a workspace is indexed once with `refresh`, then
//! an unsaved buffer is analyzed with `analyze`.

use snipe_core::{AnalysisEngine, Settings};
use std::fs;
use tempfile::TempDir;

fn engine_for(_dir: &TempDir) -> AnalysisEngine {
    AnalysisEngine::new(Settings::default())
}

#[test]
fn signature_drift_with_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lib.py"), "def greet(name, greeting='Hello'):\n    return greeting\n").unwrap();

    let engine = engine_for(&dir);
    engine.refresh(dir.path()).unwrap();

    let too_few = engine.analyze("main.py", "greet()\n").unwrap();
    assert_eq!(too_few.iter().filter(|d| d.code == "SNIPE_SIGNATURE_DRIFT").count(), 1);

    let too_many_3 = engine.analyze("main.py", "greet(\"A\", \"B\", \"C\")\n").unwrap();
    assert_eq!(too_many_3.iter().filter(|d| d.code == "SNIPE_SIGNATURE_DRIFT").count(), 1);

    let too_many_4 = engine.analyze("main.py", "greet(\"A\", \"B\", \"C\", \"D\")\n").unwrap();
    assert_eq!(too_many_4.iter().filter(|d| d.code == "SNIPE_SIGNATURE_DRIFT").count(), 1);

    let one_arg = engine.analyze("main.py", "greet(\"A\")\n").unwrap();
    assert!(one_arg.iter().all(|d| d.code != "SNIPE_SIGNATURE_DRIFT"));

    let two_args = engine.analyze("main.py", "greet(\"A\", \"B\")\n").unwrap();
    assert!(two_args.iter().all(|d| d.code != "SNIPE_SIGNATURE_DRIFT"));
}

#[test]
fn cross_language_type_isolation() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("data.c"), "float balance;\n").unwrap();

    let engine = engine_for(&dir);
    engine.refresh(dir.path()).unwrap();

    // The script buffer's own annotated assignment disagrees with its own
    // literal; the C file's `float balance` must never be consulted for a
    // dynamically typed buffer.
    let diagnostics = engine.analyze("account.py", "balance: int = 42\nbalance: float = 42\n").unwrap();
    let mismatches: Vec<_> = diagnostics.iter().filter(|d| d.code == "SNIPE_TYPE_MISMATCH").collect();
    assert_eq!(mismatches.len(), 1);
    assert!(mismatches[0].message.contains("int"));
    assert!(!mismatches[0].message.contains("balance' is declared extern"));
}

#[test]
fn extern_size_overclaim_and_type_mismatch() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("data.c"), "char arr[10];\n").unwrap();

    let engine = engine_for(&dir);
    engine.refresh(dir.path()).unwrap();

    let diagnostics = engine.analyze("test.c", "extern int arr[10];\n").unwrap();
    assert!(diagnostics.iter().any(|d| d.code == "SNIPE_TYPE_MISMATCH"));
    assert!(diagnostics.iter().all(|d| d.code != "SNIPE_ARRAY_BOUNDS"));

    let diagnostics = engine.analyze("test.c", "extern int arr[100];\n").unwrap();
    assert!(diagnostics.iter().any(|d| d.code == "SNIPE_TYPE_MISMATCH"));
    assert!(diagnostics.iter().any(|d| d.code == "SNIPE_ARRAY_BOUNDS"));
}

#[test]
fn dangerous_function_severity_split() {
    let engine = AnalysisEngine::new(Settings::default());

    let src = "int main() {\n  char buf[16];\n  char dst[16];\n  char src2[16];\n  strcpy(dst, src2);\n  gets(buf);\n}\n";
    let diagnostics = engine.analyze("main.c", src).unwrap();

    let strcpy = diagnostics.iter().find(|d| d.message.contains("strcpy")).unwrap();
    assert_eq!(strcpy.severity, snipe_core::Severity::Warning);
    assert!(strcpy.message.contains("Unsafe String Handling"));

    let gets = diagnostics.iter().find(|d| d.message.contains("gets")).unwrap();
    assert_eq!(gets.severity, snipe_core::Severity::Error);
    assert!(gets.message.contains("Removed from C Standard"));

    // Exactly one diagnostic per dangerous call: the allow-list in
    // undefined.rs must cover every name unsafe_fn.rs flags, or a second
    // SNIPE_UNDEFINED_SYMBOL warning sneaks in alongside it.
    let gets_alone = engine.analyze("main.c", "int main() {\n  char buf[16];\n  gets(buf);\n}\n").unwrap();
    assert_eq!(gets_alone.len(), 1);
    assert_eq!(gets_alone[0].code, "SNIPE_UNSAFE_FUNCTION");
}

#[test]
fn printf_format_specifier_mismatch() {
    let engine = AnalysisEngine::new(Settings::default());
    let diagnostics = engine.analyze("main.c", "int main() {\n  printf(\"%d %s\\n\", 42);\n}\n").unwrap();

    let format = diagnostics.iter().find(|d| d.code == "SNIPE_FORMAT_STRING").unwrap();
    assert!(format.message.contains('2'));
    assert!(format.message.contains('1'));
}

#[test]
fn struct_member_access_lists_available_members() {
    let engine = AnalysisEngine::new(Settings::default());
    let src = "struct Point {\n  int x;\n  int y;\n};\n\nvoid touch() {\n  struct Point p;\n  int z = p.z;\n}\n";
    let diagnostics = engine.analyze("geometry.c", src).unwrap();

    let access = diagnostics.iter().find(|d| d.code == "SNIPE_STRUCT_ACCESS").unwrap();
    assert!(access.message.contains('z'));
    assert!(access.message.contains("x, y"));
}

#[test]
fn array_bounds_boundary_values() {
    let engine = AnalysisEngine::new(Settings::default());
    let src = "int scores[5];\nint main() {\n  int a = scores[0];\n  int b = scores[4];\n  int c = scores[5];\n  int d = scores[99];\n}\n";
    let diagnostics = engine.analyze("scores.c", src).unwrap();

    assert_eq!(diagnostics.iter().filter(|d| d.code == "SNIPE_ARRAY_BOUNDS").count(), 2);
}

#[test]
fn wildcard_import_suppresses_undefined_symbol() {
    let engine = AnalysisEngine::new(Settings::default());
    let diagnostics = engine.analyze("main.py", "from os import *\n\nresult = totally_unknown_name\n").unwrap();
    assert!(diagnostics.iter().all(|d| d.code != "SNIPE_UNDEFINED_SYMBOL"));
}

#[test]
fn reanalyzing_identical_buffer_is_stable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lib.c"), "int total;\n").unwrap();

    let engine = engine_for(&dir);
    engine.refresh(dir.path()).unwrap();

    let src = "extern float total;\nint main() {\n  gets(0);\n}\n";
    let first = engine.analyze("main.c", src).unwrap();
    let second = engine.analyze("main.c", src).unwrap();
    assert_eq!(first, second);
}
