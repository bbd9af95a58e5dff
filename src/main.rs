fn main() -> Result<(), Box<dyn std::error::Error>> {
    debugmate::cli::main()
}
