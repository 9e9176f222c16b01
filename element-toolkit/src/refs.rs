/* Poisoning only happens after a panic elsewhere, at which point the page is already broken. Report
 * where the poisoned lock was taken rather than the generic unwrap message.
 */
#[macro_export]
macro_rules! lock {
    ($x: expr) => {{
        match $x.lock() {
            Ok(v) => v,
            Err(_) => {
                panic!("ELEMENT LOCK POISONED {}/{}/{}",file!(),line!(),column!());
            }
        }
    }}
}
