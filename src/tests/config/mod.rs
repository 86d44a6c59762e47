mod stream_config_tests;
