pub use puffin;
use puffin::ScopeId;

/// Turns scope recording on and closes the current profiler frame.
/// Call once per unit of work (a load, a report) that should show up as its own frame.
pub fn new_frame() {
    puffin::set_scopes_on(true);
    puffin::GlobalProfiler::lock().new_frame();
}

pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Guard that keeps a puffin scope open until dropped.
pub struct Span(#[allow(dead_code)] Option<puffin::ProfilerScope>);

impl Span {
    /// Opens a span for an already registered [`ScopeId`]. Registration must happen once per call site.
    #[inline(always)]
    pub fn enter(scope_id: ScopeId, data: &str) -> Self {
        if puffin::are_scopes_on() {
            Self(Some(puffin::ProfilerScope::new(scope_id, data)))
        } else {
            Self(None)
        }
    }
}

#[macro_export]
macro_rules! register_scope {
    ($register:expr) => {{
        static SCOPE_ID: std::sync::OnceLock<$crate::puffin::ScopeId> = std::sync::OnceLock::new();
        *SCOPE_ID.get_or_init(|| $crate::puffin::ThreadProfiler::call($register))
    }};
}

#[macro_export]
macro_rules! current_function {
    () => {{
        static FUNCTION_NAME: std::sync::OnceLock<String> = std::sync::OnceLock::new();
        FUNCTION_NAME
            .get_or_init(|| {
                $crate::puffin::clean_function_name($crate::puffin::current_function_name!())
            })
            .as_str()
    }};
}

#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        $crate::profile_scope!($name, "")
    };
    ($name:expr, $data:expr) => {
        let _profiling_span = {
            let function_name = $crate::current_function!();
            let scope_id = $crate::register_scope!(|tp| {
                tp.register_named_scope(
                    $name,
                    function_name,
                    $crate::puffin::short_file_name(file!()),
                    line!(),
                )
            });
            $crate::Span::enter(scope_id, $data)
        };
    };
}

#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profile_function!("")
    };
    ($data:expr) => {
        let _profiling_span = {
            let function_name = $crate::current_function!();
            let scope_id = $crate::register_scope!(|tp| {
                tp.register_function_scope(
                    function_name,
                    $crate::puffin::short_file_name(file!()),
                    line!(),
                )
            });
            $crate::Span::enter(scope_id, $data)
        };
    };
}
