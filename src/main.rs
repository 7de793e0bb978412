fn main() {
    versecast::app::cli::run();
}
