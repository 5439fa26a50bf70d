//! SNIPE_UNSAFE_FUNCTION: call sites naming a function CERT's C Secure
//! Coding Standard flags as removed or unsafe. `gets` is an error (removed
//! from the standard in C11); everything else in the table is a warning.
//! C/header files only.

use super::AnalysisContext;
use crate::language::Language;
use crate::model::{Diagnostic, Reference, Severity};

struct DangerousFn {
    name: &'static str,
    category: &'static str,
    reason: &'static str,
    suggestion: &'static str,
    severity: Severity,
}

const REMOVED: &[DangerousFn] = &[DangerousFn {
    name: "gets",
    category: "Removed from C Standard (C11+)",
    reason: "cannot bound the number of bytes read, guaranteeing a buffer overflow on long input",
    suggestion: "use fgets(buf, sizeof buf, stdin) instead",
    severity: Severity::Error,
}];

const UNSAFE: &[DangerousFn] = &[
    DangerousFn {
        name: "strcpy",
        category: "Unsafe String Handling",
        reason: "does not bound the number of bytes copied",
        suggestion: "use strncpy or snprintf with an explicit size",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "strcat",
        category: "Unsafe String Handling",
        reason: "does not bound the number of bytes appended",
        suggestion: "use strncat with an explicit size",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "sprintf",
        category: "Unsafe Formatted Output",
        reason: "writes to the destination buffer without a size limit",
        suggestion: "use snprintf with an explicit size",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "vsprintf",
        category: "Unsafe Formatted Output",
        reason: "writes to the destination buffer without a size limit",
        suggestion: "use vsnprintf with an explicit size",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "scanf",
        category: "Potentially Unsafe Input",
        reason: "%s and similar conversions read without a bound unless a field width is given",
        suggestion: "supply an explicit field width or use fgets plus a bounded parser",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "sscanf",
        category: "Potentially Unsafe Input",
        reason: "%s and similar conversions read without a bound unless a field width is given",
        suggestion: "supply an explicit field width",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "tmpnam",
        category: "Temporary File Race",
        reason: "the returned name can be claimed by another process before this one opens it",
        suggestion: "use mkstemp instead",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "tempnam",
        category: "Temporary File Race",
        reason: "the returned name can be claimed by another process before this one opens it",
        suggestion: "use mkstemp instead",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "getenv",
        category: "Memory/Environment Risk",
        reason: "the returned pointer may be invalidated by a later call to getenv or setenv",
        suggestion: "copy the result immediately if it must outlive the next environment call",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "rand",
        category: "Weak Random Number Generation",
        reason: "not suitable for anything security-sensitive; its output is predictable",
        suggestion: "use a CSPRNG such as arc4random or a platform crypto API",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "atoi",
        category: "Unsafe Type Conversion",
        reason: "gives no indication of conversion failure and has undefined behavior on overflow",
        suggestion: "use strtol and check errno/endptr",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "atol",
        category: "Unsafe Type Conversion",
        reason: "gives no indication of conversion failure and has undefined behavior on overflow",
        suggestion: "use strtol and check errno/endptr",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "system",
        category: "Process Execution/Command-Injection Risk",
        reason: "passes its argument to a shell, so untrusted input becomes arbitrary command execution",
        suggestion: "use execve/posix_spawn with an argument vector instead of a shell command line",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "popen",
        category: "Process Execution/Command-Injection Risk",
        reason: "passes its argument to a shell, so untrusted input becomes arbitrary command execution",
        suggestion: "use posix_spawn with an explicit argument vector",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "signal",
        category: "Unsafe Signal Handling",
        reason: "behavior and portability vary across platforms; handlers running async-signal-unsafe code invite races",
        suggestion: "use sigaction with an explicit signal mask",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "memcpy",
        category: "Dangerous Memory Operations",
        reason: "overlapping source and destination regions are undefined behavior",
        suggestion: "use memmove when the regions might overlap",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "strtok",
        category: "Legacy/Obsolete",
        reason: "keeps hidden static state, making it non-reentrant and unsafe across threads",
        suggestion: "use strtok_r",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "gmtime",
        category: "Legacy/Obsolete (Not Thread-Safe)",
        reason: "returns a pointer to shared static storage, which a concurrent call can overwrite",
        suggestion: "use gmtime_r",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "localtime",
        category: "Legacy/Obsolete (Not Thread-Safe)",
        reason: "returns a pointer to shared static storage, which a concurrent call can overwrite",
        suggestion: "use localtime_r",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "asctime",
        category: "Legacy/Obsolete (Not Thread-Safe)",
        reason: "returns a pointer to shared static storage, which a concurrent call can overwrite",
        suggestion: "use asctime_r or strftime",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "ctime",
        category: "Legacy/Obsolete (Not Thread-Safe)",
        reason: "returns a pointer to shared static storage, which a concurrent call can overwrite",
        suggestion: "use ctime_r or strftime",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "rewind",
        category: "Unreliable Environment Info",
        reason: "discards the stream's error indicator, hiding a prior failed operation",
        suggestion: "check ferror before rewind if the prior operation's outcome matters",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "tmpfile",
        category: "Temporary File Race",
        reason: "on some platforms falls back to a predictable path if a secure one is unavailable",
        suggestion: "use mkstemp with an explicit, unpredictable template",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "mktemp",
        category: "Temporary File Race",
        reason: "returns a name that can be claimed by another process before this one opens it",
        suggestion: "use mkstemp instead",
        severity: Severity::Warning,
    },
    DangerousFn {
        name: "gethostbyname",
        category: "Legacy/Obsolete (Not Thread-Safe)",
        reason: "returns a pointer to shared static storage, which a concurrent call can overwrite",
        suggestion: "use getaddrinfo",
        severity: Severity::Warning,
    },
];

fn lookup(name: &str) -> Option<&'static DangerousFn> {
    REMOVED
        .iter()
        .chain(UNSAFE.iter())
        .find(|f| f.name == name)
}

pub fn check(ctx: &AnalysisContext) -> Vec<Diagnostic> {
    if ctx.language != Language::C {
        return Vec::new();
    }

    ctx.references
        .iter()
        .filter_map(|reference| {
            let (name, line) = match reference {
                Reference::Call { name, line, .. } => (name, *line),
                Reference::FormatCall { name, line, .. } => (name, *line),
                _ => return None,
            };
            let entry = lookup(name)?;
            Some(Diagnostic::new(
                ctx.file_path,
                line,
                entry.severity,
                "SNIPE_UNSAFE_FUNCTION",
                format!("'{}()' -- {}. {}. {}.", entry.name, entry.category, entry.reason, entry.suggestion),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RepoIndex;

    #[test]
    fn gets_is_an_error_strcpy_is_a_warning() {
        let repo = RepoIndex::default();
        let references = vec![
            Reference::Call { name: "gets".into(), line: 1, arg_count: 1, arg_types: vec![None] },
            Reference::Call { name: "strcpy".into(), line: 2, arg_count: 2, arg_types: vec![None, None] },
        ];
        let ctx = AnalysisContext {
            file_path: "a.c",
            language: Language::C,
            symbols: &[],
            references: &references,
            repo: &repo,
        };
        let diagnostics = check(&ctx);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[1].severity, Severity::Warning);
    }
}
