//! @ai:module:intent Python source templates emitted by the generator
//! @ai:module:layer domain
//! @ai:module:public_api FUTURE_DIRECTIVE, OBJECT_TEMPLATE, MODULE_EPILOGUE, MEMORY_PROBE_TEMPLATE, render_function_pair, render_import
//! @ai:module:stateless true

/// Directive placed at the top of every module of the deferred variant.
pub const FUTURE_DIRECTIVE: &str = "from __future__ import annotations\n\n";

pub const OBJECT_TEMPLATE: &str = r#"
from dataclasses import dataclass, field
from typing import NewType, TypeAlias, TypeVar
import sys

Email= NewType("Email", str)
UserID: TypeAlias = int
T = TypeVar("T")

@dataclass
class Object:
    simple: bool
    author: UserID
    emails: set[Email] = field(default_factory=set)

    @classmethod
    def from_str(cls: type[T], serialized: str) -> T:
        ...
"#;

/// Last statement of each generated module.
pub const MODULE_EPILOGUE: &str = "print(__file__, file=sys.stderr)";

/// Prints resident memory of an interpreter that has imported the whole tree.
pub const MEMORY_PROBE_TEMPLATE: &str = r#"
import os
import sys

from . import aggregate


def resident_megabytes():
    try:
        import psutil
    except ImportError:
        pass
    else:
        return psutil.Process(os.getpid()).memory_info().rss / 1024 / 1024

    try:
        with open("/proc/self/statm") as statm:
            pages = int(statm.read().split()[1])
        return pages * os.sysconf("SC_PAGE_SIZE") / 1024 / 1024
    except (OSError, ValueError, IndexError):
        pass

    import resource

    # peak rather than current RSS; bytes on macOS, KiB elsewhere
    peak = resource.getrusage(resource.RUSAGE_SELF).ru_maxrss
    if sys.platform == "darwin":
        return peak / 1024 / 1024
    return peak / 1024


print(f"{resident_megabytes():.2f} MB")
"#;

/// @ai:intent Render the simple and complex annotated function pair for an index
/// @ai:effects pure
pub fn render_function_pair(func_idx: usize) -> String {
    format!(
        "
def function_simple{func_idx}(arg: str) -> None:
    ...

def function_complex{func_idx}(arg1: int, arg2: dict[int, list[int | str | None]]) -> Object:
    ...
"
    )
}

/// @ai:intent Render one relative import line of the aggregator module
/// @ai:example ("pkg3", "module312") -> "from .pkg3 import module312\n"
/// @ai:effects pure
pub fn render_import(package: &str, module: &str) -> String {
    format!("from .{package} import {module}\n")
}
