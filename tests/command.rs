mod tests {
    use glowring::command::{Command, CommandQueue};

    #[test]
    fn test_parse_valid_commands() {
        assert_eq!(Command::parse("p3"), Some(Command::SelectRoutine(3)));
        assert_eq!(Command::parse("p0"), Some(Command::SelectRoutine(0)));
        assert_eq!(Command::parse("b128"), Some(Command::SetBpm(128)));
        assert_eq!(Command::parse("m200"), Some(Command::SetMaxBrightness(200)));
        // Surrounding whitespace from a line-oriented console is fine.
        assert_eq!(Command::parse(" p12\n"), Some(Command::SelectRoutine(12)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("p"), None);
        assert_eq!(Command::parse("pxyz"), None);
        assert_eq!(Command::parse("p-1"), None);
        assert_eq!(Command::parse("p300"), None); // overflows u8
        assert_eq!(Command::parse("x5"), None);
        assert_eq!(Command::parse("b12b"), None);
        assert_eq!(Command::parse("99"), None);
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue: CommandQueue<4> = CommandQueue::new();
        assert!(queue.try_receive().is_none());

        queue.try_send(Command::SetBpm(100)).unwrap();
        queue.try_send(Command::SetBpm(110)).unwrap();

        assert_eq!(queue.try_receive(), Some(Command::SetBpm(100)));
        assert_eq!(queue.try_receive(), Some(Command::SetBpm(110)));
        assert!(queue.try_receive().is_none());
    }

    #[test]
    fn test_queue_rejects_when_full() {
        let queue: CommandQueue<2> = CommandQueue::new();
        queue.try_send(Command::SetBpm(1)).unwrap();
        queue.try_send(Command::SetBpm(2)).unwrap();
        assert!(queue.try_send(Command::SetBpm(3)).is_err());

        // Draining frees a slot again.
        assert_eq!(queue.try_receive(), Some(Command::SetBpm(1)));
        assert!(queue.try_send(Command::SetBpm(3)).is_ok());
    }
}
