fn main() {
    slint_build::compile("ui/overlay.slint").expect("Slint build failed");
}
