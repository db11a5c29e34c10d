use crate::parser::base::CliError;

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: &CliError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &CliError) {
        eprintln!("Parse error: {error}");
    }
}

#[cfg(feature = "unit_test")]
#[derive(Default)]
pub(crate) struct SilentInterface {}

#[cfg(feature = "unit_test")]
impl UserInterface for SilentInterface {
    fn print(&self, _message: String) {
        // Do nothing
    }

    fn print_error(&self, _error: &CliError) {
        // Do nothing
    }
}
