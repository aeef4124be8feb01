pub type CmdResult<T> = logmigrate::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Print the JSON envelope instead of human-readable lines.
    pub json: bool,
}

pub mod rewrite;
