use vigil_lifecycle::lifecycle_observer;

struct Plain;

/// An impl block without callbacks is left as is.
#[lifecycle_observer]
impl Plain {
    fn value(&self) -> u8 {
        7
    }
}

fn main() {
    assert_eq!(Plain.value(), 7);
}
