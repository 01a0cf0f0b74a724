fn main() {
    dwi_tools::cli::run();
}
