use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    wingman::cli::main()
}
