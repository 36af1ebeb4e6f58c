use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata backs `herald --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
