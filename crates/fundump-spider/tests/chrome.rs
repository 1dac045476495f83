#![cfg(feature = "chrome")]

use chromiumoxide::error::CdpError;
use fundump_spider::browser::chrome::REQUEST_TIMEOUT;
use fundump_spider::browser::NavigationFailure;

#[test]
fn request_timeouts_carry_their_budget() {
    assert_eq!(
        NavigationFailure::from(CdpError::Timeout),
        NavigationFailure::Timeout(REQUEST_TIMEOUT)
    );
}

#[test]
fn other_devtools_errors_are_unclassified() {
    let failure = NavigationFailure::from(CdpError::NoResponse);
    assert!(matches!(failure, NavigationFailure::Other(_)));
}
