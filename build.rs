use shadow_rs::ShadowBuilder;

fn main() {
    // Version and git metadata for `--version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
