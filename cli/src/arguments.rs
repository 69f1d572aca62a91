pub(crate) fn parse_base_limit(args: Vec<String>) -> Option<u64> {
    if args.len() < 2 {
        return None;
    }

    let limit: u64 = args[1].parse().expect("Invalid base count");
    if limit == 0 {
        panic!("Base count must be >= 1");
    }

    Some(limit)
}

#[cfg(test)]
mod tests {
    use super::parse_base_limit;

    #[test]
    fn no_argument_means_unbounded() {
        assert_eq!(parse_base_limit(vec![String::from("certifier")]), None);
    }

    #[test]
    fn a_count_bounds_the_run() {
        let args = vec![String::from("certifier"), String::from("500")];
        assert_eq!(parse_base_limit(args), Some(500));
    }

    #[test]
    #[should_panic(expected = "Base count")]
    fn zero_is_rejected() {
        parse_base_limit(vec![String::from("certifier"), String::from("0")]);
    }
}
