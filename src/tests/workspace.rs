use crate::cores::workspace::Workspace;

static SCRATCH: Workspace<96> = Workspace::new();

#[test]
fn claimed_once_and_aligned() {
    assert_eq!(SCRATCH.len(), 96);
    let buf = SCRATCH.claim().unwrap();
    assert_eq!(buf.len(), 96);
    assert_eq!(buf.as_ptr() as usize % 16, 0);
    assert!(SCRATCH.claim().is_none());
}
