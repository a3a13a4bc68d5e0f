fn main() -> std::process::ExitCode {
    pki2fa::run()
}
