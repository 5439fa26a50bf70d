//! SNIPE_UNDEFINED_SYMBOL. Builds the set of everything the buffer could
//! legitimately reference — its own symbols, the repository's symbols,
//! names pulled in by import references, plus each language's builtins —
//! and flags anything outside it. A wildcard import (`from x import *`)
//! makes the closed-world assumption untenable, so the whole check is
//! suppressed for that buffer, same as the extractor it replaces.

use std::collections::HashSet;

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity};

const PYTHON_BUILTINS: &[&str] = &[
    "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool", "bytearray", "bytes",
    "callable", "chr", "classmethod", "compile", "complex", "delattr", "dict", "dir", "divmod",
    "enumerate", "eval", "exec", "filter", "float", "format", "frozenset", "getattr", "globals",
    "hasattr", "hash", "help", "hex", "id", "input", "int", "isinstance", "issubclass", "iter",
    "len", "list", "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open",
    "ord", "pow", "print", "property", "range", "repr", "reversed", "round", "set", "setattr",
    "slice", "sorted", "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip",
    "__import__", "True", "False", "None", "NotImplemented", "Ellipsis", "__name__", "__file__",
    "__doc__", "self", "cls", "Exception", "BaseException", "ValueError", "TypeError",
    "KeyError", "IndexError", "AttributeError", "RuntimeError", "StopIteration",
    "StopAsyncIteration", "NotImplementedError", "ZeroDivisionError", "OSError", "IOError",
    "FileNotFoundError", "ImportError", "ModuleNotFoundError", "NameError", "UnboundLocalError",
    "ArithmeticError", "OverflowError", "AssertionError", "LookupError", "MemoryError",
    "RecursionError", "SystemExit", "KeyboardInterrupt", "GeneratorExit", "Warning",
    "DeprecationWarning", "UserWarning",
];

// Includes every name the dangerous-function table in `unsafe_fn.rs` flags
// (gets, atoi, atol, popen, asctime, ctime, vsprintf, tempnam, mktemp,
// gethostbyname), so a call to one of those produces exactly the
// SNIPE_UNSAFE_FUNCTION diagnostic it should, never an additional
// SNIPE_UNDEFINED_SYMBOL for the same call.
const C_STDLIB_FUNCTIONS: &[&str] = &[
    "printf", "fprintf", "sprintf", "vsprintf", "snprintf", "scanf", "fscanf", "sscanf", "puts",
    "fputs", "putchar", "getchar", "gets", "fgets", "fgetc", "fopen", "fclose", "fread",
    "fwrite", "fseek", "ftell", "rewind", "feof", "ferror", "remove", "rename", "tmpfile",
    "tmpnam", "tempnam", "mktemp", "malloc", "calloc", "realloc", "free", "exit", "abort",
    "atexit", "system", "popen", "getenv", "setenv", "qsort", "bsearch", "abs", "labs", "div",
    "ldiv", "rand", "srand", "atoi", "atol", "strlen", "strcpy", "strncpy", "strcat", "strncat",
    "strcmp", "strncmp", "strchr", "strrchr", "strstr", "strtok", "strtol", "strtoul", "strtod",
    "memcpy", "memmove", "memset", "memcmp", "memchr", "isalpha", "isdigit", "isalnum",
    "isspace", "isupper", "islower", "toupper", "tolower", "time", "clock", "difftime",
    "mktime", "localtime", "gmtime", "asctime", "ctime", "strftime", "signal", "raise",
    "setjmp", "longjmp", "va_start", "va_arg", "va_end", "assert", "sizeof", "NULL", "errno",
    "sqrt", "pow", "exp", "log", "log10", "sin", "cos", "tan", "floor", "ceil", "fabs", "fmod",
    "gethostbyname", "main", "argc", "argv",
];

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    let mut all_known: HashSet<&str> = HashSet::new();
    for sym in ctx.symbols {
        all_known.insert(&sym.name);
    }
    for sym in &ctx.repo.symbols {
        all_known.insert(&sym.name);
    }

    let mut has_wildcard_import = false;
    for reference in ctx.references {
        if let Reference::Import { imported_names, is_wildcard, .. } = reference {
            if *is_wildcard {
                has_wildcard_import = true;
            }
            for name in imported_names {
                all_known.insert(name);
            }
        }
    }

    match ctx.language {
        Language::Script => {
            if has_wildcard_import {
                return Vec::new();
            }
            all_known.extend(PYTHON_BUILTINS.iter().copied());
        }
        Language::C => {
            all_known.extend(C_STDLIB_FUNCTIONS.iter().copied());
        }
    }

    let mut diagnostics = Vec::new();
    for reference in ctx.references {
        match reference {
            Reference::Read { name, line } if !all_known.contains(name.as_str()) => {
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Warning,
                    "SNIPE_UNDEFINED_SYMBOL",
                    format!("'{name}' is not defined anywhere in this buffer or the repository."),
                ));
            }
            Reference::Call { name, line, .. }
                if !name.contains('.') && !all_known.contains(name.as_str()) =>
            {
                diagnostics.push(Diagnostic::new(
                    ctx.file_path,
                    *line,
                    Severity::Warning,
                    "SNIPE_UNDEFINED_SYMBOL",
                    format!("call to undefined function '{name}'."),
                ));
            }
            _ => {}
        }
    }
    diagnostics
}
