fn main() {
    sql_migrate::list(Some("migrations")).expect("failed to embed migrations");
}
